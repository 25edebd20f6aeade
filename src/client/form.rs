use crate::client::{CROP_TYPES, FERTILIZER_SOIL_TYPES, IRRIGATION_SOIL_TYPES, REGIONS, SEASONS};
use crate::domain::limits::Quantity;
use crate::domain::model::{CropRequest, FertilizerRequest, IrrigationRequest};
use std::io::{self, BufRead, Write};

pub fn default_crop_request() -> CropRequest {
    CropRequest {
        n: 0.0,
        p: 0.0,
        k: 0.0,
        ph: 6.5,
        temperature: 25.0,
        humidity: 50.0,
        rainfall: 0.0,
    }
}

pub fn default_fertilizer_request() -> FertilizerRequest {
    FertilizerRequest {
        temperature: 25.0,
        humidity: 50.0,
        moisture: 30.0,
        soil_type: FERTILIZER_SOIL_TYPES[0].to_string(),
        crop_type: CROP_TYPES[0].to_string(),
        nitrogen: 50.0,
        potassium: 20.0,
        phosphorous: 30.0,
    }
}

pub fn default_irrigation_request() -> IrrigationRequest {
    IrrigationRequest {
        region: REGIONS[0].to_string(),
        crop_type: CROP_TYPES[0].to_string(),
        soil_type: IRRIGATION_SOIL_TYPES[0].to_string(),
        season: SEASONS[0].to_string(),
        farm_area: 1.0,
        soil_ph: 6.5,
        nitrogen: 0.0,
        phosphorus: 0.0,
        potassium: 0.0,
        soil_moisture: 30.0,
        temperature: 25.0,
        rainfall: 0.0,
    }
}

/// Line-oriented prompts. An empty answer keeps the default.
pub struct Form<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed line. EOF is an error so callers cannot loop forever.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Numeric input bounded by the registry entry for `quantity`.
    pub fn slider(&mut self, label: &str, quantity: Quantity, default: f64) -> io::Result<f64> {
        let limit = quantity.limit();
        loop {
            write!(
                self.output,
                "{} [{} - {}] ({}): ",
                label, limit.min, limit.max, default
            )?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(value) if limit.contains(value) => return Ok(value),
                _ => writeln!(
                    self.output,
                    "⚠️ Enter a number between {} and {}",
                    limit.min, limit.max
                )?,
            }
        }
    }

    /// Numbered choice; also accepts the option text. Defaults to the first option.
    pub fn dropdown(&mut self, label: &str, options: &[&str]) -> io::Result<String> {
        loop {
            writeln!(self.output, "{}:", label)?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, option)?;
            }
            write!(self.output, "Choose 1-{} (1): ", options.len())?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(options[0].to_string());
            }
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i))
                .or_else(|| options.iter().find(|o| o.eq_ignore_ascii_case(&answer)));
            match picked {
                Some(option) => return Ok(option.to_string()),
                None => writeln!(self.output, "⚠️ '{}' is not one of the options", answer)?,
            }
        }
    }

    pub fn crop_form(&mut self) -> io::Result<CropRequest> {
        let d = default_crop_request();
        writeln!(self.output, "🌾 Crop Recommendation")?;
        Ok(CropRequest {
            n: self.slider("Nitrogen (kg/ha)", Quantity::Nitrogen, d.n)?,
            p: self.slider("Phosphorus (kg/ha)", Quantity::Phosphorus, d.p)?,
            k: self.slider("Potassium (kg/ha)", Quantity::Potassium, d.k)?,
            ph: self.slider("Soil pH", Quantity::Ph, d.ph)?,
            temperature: self.slider("Temperature (°C)", Quantity::Temperature, d.temperature)?,
            humidity: self.slider("Humidity (%)", Quantity::Humidity, d.humidity)?,
            rainfall: self.slider("Rainfall (mm/day)", Quantity::Rainfall, d.rainfall)?,
        })
    }

    pub fn fertilizer_form(&mut self) -> io::Result<FertilizerRequest> {
        let d = default_fertilizer_request();
        writeln!(self.output, "🧪 Fertilizer Recommendation")?;
        writeln!(
            self.output,
            "Enter all soil and crop parameters below to get the best fertilizer recommendation."
        )?;
        let temperature = self.slider("Temperature (°C)", Quantity::Temperature, d.temperature)?;
        let humidity = self.slider("Humidity (%)", Quantity::Humidity, d.humidity)?;
        let moisture = self.slider("Soil Moisture (%)", Quantity::SoilMoisture, d.moisture)?;
        let nitrogen = self.slider("Nitrogen (kg/ha)", Quantity::Nitrogen, d.nitrogen)?;
        let phosphorous = self.slider("Phosphorus (kg/ha)", Quantity::Phosphorus, d.phosphorous)?;
        let potassium = self.slider("Potassium (kg/ha)", Quantity::Potassium, d.potassium)?;
        let soil_type = self.dropdown("Soil Type", &FERTILIZER_SOIL_TYPES)?;
        let crop_type = self.dropdown("Crop Type", &CROP_TYPES)?;
        Ok(FertilizerRequest {
            temperature,
            humidity,
            moisture,
            soil_type,
            crop_type,
            nitrogen,
            potassium,
            phosphorous,
        })
    }

    pub fn irrigation_form(&mut self) -> io::Result<IrrigationRequest> {
        let d = default_irrigation_request();
        writeln!(self.output, "💧 Irrigation Prediction")?;
        let region = self.dropdown("Region", &REGIONS)?;
        let soil_type = self.dropdown("Soil Type", &IRRIGATION_SOIL_TYPES)?;
        let season = self.dropdown("Season", &SEASONS)?;
        let farm_area = self.slider("Farm Area (acres)", Quantity::FarmArea, d.farm_area)?;
        let soil_moisture =
            self.slider("Soil Moisture (%)", Quantity::SoilMoisture, d.soil_moisture)?;
        let temperature = self.slider("Temperature (°C)", Quantity::Temperature, d.temperature)?;
        let rainfall = self.slider("Rainfall (mm)", Quantity::Rainfall, d.rainfall)?;
        let nitrogen = self.slider("Nitrogen (kg/ha)", Quantity::Nitrogen, d.nitrogen)?;
        let phosphorus = self.slider("Phosphorus (kg/ha)", Quantity::Phosphorus, d.phosphorus)?;
        let potassium = self.slider("Potassium (kg/ha)", Quantity::Potassium, d.potassium)?;
        let soil_ph = self.slider("Soil pH", Quantity::Ph, d.soil_ph)?;
        let crop_type = self.dropdown("Crop (for irrigation)", &CROP_TYPES)?;
        Ok(IrrigationRequest {
            region,
            crop_type,
            soil_type,
            season,
            farm_area,
            soil_ph,
            nitrogen,
            phosphorus,
            potassium,
            soil_moisture,
            temperature,
            rainfall,
        })
    }
}
