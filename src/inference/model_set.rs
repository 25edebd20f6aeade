use crate::config::toml_config::ModelsConfig;
use crate::domain::model::Domain;
use crate::domain::ports::Model;
use crate::inference::ensemble::TreeEnsemble;
use crate::utils::error::{GrowwellError, Result, StartupError};
use std::path::Path;
use std::sync::Arc;

/// The three models, loaded once at process start and shared read-only.
///
/// A domain whose artifact failed to load stays `None`; its failure is kept in
/// `failures` so startup can decide whether to continue.
#[derive(Default)]
pub struct ModelSet {
    pub crop: Option<Arc<dyn Model>>,
    pub fertilizer: Option<Arc<dyn Model>>,
    pub irrigation: Option<Arc<dyn Model>>,
    pub failures: Vec<StartupError>,
}

impl ModelSet {
    pub fn load(paths: &ModelsConfig) -> Self {
        let mut set = ModelSet::default();
        for domain in Domain::ALL {
            match load_model(domain, paths.path_for(domain)) {
                Ok(model) => set.insert(domain, model),
                Err(e) => {
                    tracing::error!("❌ {}", e);
                    set.failures.push(e);
                }
            }
        }
        set
    }

    pub fn insert(&mut self, domain: Domain, model: Arc<dyn Model>) {
        let slot = match domain {
            Domain::Crop => &mut self.crop,
            Domain::Fertilizer => &mut self.fertilizer,
            Domain::Irrigation => &mut self.irrigation,
        };
        *slot = Some(model);
    }

    pub fn get(&self, domain: Domain) -> Option<Arc<dyn Model>> {
        match domain {
            Domain::Crop => self.crop.clone(),
            Domain::Fertilizer => self.fertilizer.clone(),
            Domain::Irrigation => self.irrigation.clone(),
        }
    }

    pub fn loaded_domains(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|d| self.get(*d).is_some())
            .collect()
    }

    /// Startup gate. Aborts when nothing loaded, or on any failure in strict mode.
    pub fn ensure_servable(mut self, strict: bool) -> Result<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        if strict || self.loaded_domains().is_empty() {
            return Err(GrowwellError::StartupError(self.failures.remove(0)));
        }
        for failure in &self.failures {
            tracing::warn!("⚠️ {} routes disabled: {}", failure.domain(), failure);
        }
        Ok(self)
    }
}

pub fn load_model(domain: Domain, path: &Path) -> std::result::Result<Arc<dyn Model>, StartupError> {
    let model = TreeEnsemble::from_path(domain, path)?;
    tracing::info!(
        "✅ Loaded {} model from {} ({} trees)",
        domain.key(),
        path.display(),
        model.trees.len()
    );
    Ok(Arc::new(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped() -> ModelsConfig {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models");
        ModelsConfig {
            crop: root.join("crop_best.json"),
            fertilizer: root.join("fertilizer_best_model.json"),
            irrigation: root.join("irrigation_best_model.json"),
        }
    }

    #[test]
    fn test_load_shipped_models() {
        let set = ModelSet::load(&shipped());
        assert!(set.failures.is_empty());
        assert_eq!(set.loaded_domains(), Domain::ALL.to_vec());
        assert!(set.ensure_servable(true).is_ok());
    }

    #[test]
    fn test_partial_failure_disables_one_domain() {
        let mut paths = shipped();
        paths.fertilizer = PathBuf::from("/missing/fertilizer.json");

        let set = ModelSet::load(&paths);
        assert_eq!(set.failures.len(), 1);
        assert_eq!(set.failures[0].domain(), Domain::Fertilizer);
        assert!(set.fertilizer.is_none());
        assert_eq!(set.loaded_domains(), vec![Domain::Crop, Domain::Irrigation]);

        let set = set.ensure_servable(false).unwrap();
        assert!(set.crop.is_some());
    }

    #[test]
    fn test_strict_mode_aborts_on_any_failure() {
        let mut paths = shipped();
        paths.irrigation = PathBuf::from("/missing/irrigation.json");
        let err = ModelSet::load(&paths).ensure_servable(true).err().unwrap();
        assert!(matches!(err, GrowwellError::StartupError(_)));
    }

    #[test]
    fn test_nothing_loaded_aborts() {
        let paths = ModelsConfig {
            crop: PathBuf::from("/missing/a.json"),
            fertilizer: PathBuf::from("/missing/b.json"),
            irrigation: PathBuf::from("/missing/c.json"),
        };
        assert!(ModelSet::load(&paths).ensure_servable(false).is_err());
    }
}
