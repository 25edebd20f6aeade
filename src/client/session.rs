use crate::client::backend::AdvisorBackend;
use crate::client::form::Form;
use crate::client::render;
use crate::domain::model::Domain;
use crate::utils::error::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const MENU: [(Domain, &str); 3] = [
    (Domain::Crop, "🌾 Crop Recommendation"),
    (Domain::Fertilizer, "🧪 Fertilizer Recommendation"),
    (Domain::Irrigation, "💧 Irrigation Prediction"),
];

/// One dashboard run: menu, form, prediction, rendered result.
pub struct Session<'a, B: ?Sized, R, W> {
    backend: &'a B,
    form: Form<R, W>,
    assets_dir: PathBuf,
}

impl<'a, B, R, W> Session<'a, B, R, W>
where
    B: AdvisorBackend + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(backend: &'a B, input: R, output: W, assets_dir: PathBuf) -> Self {
        Self {
            backend,
            form: Form::new(input, output),
            assets_dir,
        }
    }

    pub fn into_output(self) -> W {
        self.form.into_output()
    }

    /// With a domain, fills that one form. Without, loops on the menu until
    /// `q` or end of input.
    pub async fn run(&mut self, domain: Option<Domain>) -> Result<()> {
        if let Some(domain) = domain {
            return self.predict(domain).await;
        }

        {
            let out = self.form.output();
            writeln!(out, "🌱 GrowWell - Smart Farming Dashboard")?;
            writeln!(
                out,
                "Predict the best crop, fertilizer, and irrigation requirements in real-time."
            )?;
        }

        loop {
            match self.choose()? {
                Some(domain) => self.predict(domain).await?,
                None => return Ok(()),
            }
        }
    }

    fn choose(&mut self) -> io::Result<Option<Domain>> {
        loop {
            let out = self.form.output();
            writeln!(out)?;
            for (i, (_, title)) in MENU.iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, title)?;
            }
            write!(out, "Choose 1-3, q to quit: ")?;
            out.flush()?;

            let answer = match self.form.read_line() {
                Ok(answer) => answer,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e),
            };
            match answer.as_str() {
                "q" | "Q" | "quit" => return Ok(None),
                "1" => return Ok(Some(Domain::Crop)),
                "2" => return Ok(Some(Domain::Fertilizer)),
                "3" => return Ok(Some(Domain::Irrigation)),
                other => writeln!(self.form.output(), "⚠️ Unknown choice '{}'", other)?,
            }
        }
    }

    async fn predict(&mut self, domain: Domain) -> Result<()> {
        match domain {
            Domain::Crop => {
                let request = self.form.crop_form()?;
                match self.backend.recommend_crop(&request).await {
                    Ok(outcome) => {
                        render::render_crop(self.form.output(), &outcome, &self.assets_dir)?
                    }
                    Err(e) => render::render_transport_error(self.form.output(), domain, &e)?,
                }
            }
            Domain::Fertilizer => {
                let request = self.form.fertilizer_form()?;
                match self.backend.recommend_fertilizer(&request).await {
                    Ok(outcome) => render::render_fertilizer(self.form.output(), &outcome)?,
                    Err(e) => render::render_transport_error(self.form.output(), domain, &e)?,
                }
            }
            Domain::Irrigation => {
                let request = self.form.irrigation_form()?;
                match self.backend.predict_irrigation(&request).await {
                    Ok(outcome) => render::render_irrigation(self.form.output(), &outcome)?,
                    Err(e) => render::render_transport_error(self.form.output(), domain, &e)?,
                }
            }
        }
        Ok(())
    }
}
