//! JSON decision-tree ensemble, the artifact format the service ships with.
//!
//! Columns are matched by exact name against the adapter's feature row.
//! Categorical columns are ordinal-encoded by their position in `categories`.
//! Splits send `x <= threshold` left. Classifiers take a majority vote over
//! tree leaves (ties go to the lowest class position); regressors average
//! the leaves and add `base_score`.

use crate::domain::model::{ClassLabel, Domain, FeatureRow, FeatureValue, ModelOutput};
use crate::domain::ports::Model;
use crate::utils::error::{InferenceError, StartupError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Classification,
    Regression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSpec {
    Numeric { name: String },
    Categorical { name: String, categories: Vec<String> },
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        match self {
            ColumnSpec::Numeric { name } | ColumnSpec::Categorical { name, .. } => name,
        }
    }

    fn encode(&self, value: &FeatureValue) -> Result<f64, InferenceError> {
        match (self, value) {
            (ColumnSpec::Numeric { .. }, FeatureValue::Number(v)) => Ok(*v),
            (ColumnSpec::Numeric { name }, FeatureValue::Text(_)) => {
                Err(InferenceError::TypeMismatch {
                    column: name.clone(),
                    expected: "numeric",
                })
            }
            (ColumnSpec::Categorical { name, categories }, FeatureValue::Text(v)) => categories
                .iter()
                .position(|c| c == v)
                .map(|i| i as f64)
                .ok_or_else(|| InferenceError::UnknownCategory {
                    column: name.clone(),
                    value: v.clone(),
                }),
            (ColumnSpec::Categorical { name, .. }, FeatureValue::Number(_)) => {
                Err(InferenceError::TypeMismatch {
                    column: name.clone(),
                    expected: "categorical",
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Nodes are stored flat; children always sit after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, x: &[f64]) -> Result<f64, InferenceError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x.get(*feature).ok_or_else(|| {
                        InferenceError::UnexpectedOutput(format!("split on missing feature {}", feature))
                    })?;
                    index = if *v <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(InferenceError::UnexpectedOutput(format!(
                        "tree references missing node {}",
                        index
                    )))
                }
            }
        }
    }

    fn check(&self, n_columns: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= n_columns {
                        return Err(format!("node {} splits on unknown feature {}", i, feature));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                Node::Leaf { value } if !value.is_finite() => {
                    return Err(format!("node {} has a non-finite leaf", i));
                }
                Node::Leaf { .. } => {}
            }
        }
        Ok(())
    }

    fn leaves(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Leaf { value } => Some(*value),
            Node::Split { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub name: Option<String>,
    pub task: Task,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub classes: Vec<ClassLabel>,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// 從 JSON 檔案載入並檢查模型結構
    pub fn from_path(domain: Domain, path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StartupError::Read {
            domain,
            path: path.to_path_buf(),
            source,
        })?;

        let model: Self = serde_json::from_str(&content).map_err(|source| StartupError::Decode {
            domain,
            path: path.to_path_buf(),
            source,
        })?;

        model.check().map_err(|reason| StartupError::Malformed {
            domain,
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(model)
    }

    /// Structural checks so that `predict` never indexes out of bounds.
    pub fn check(&self) -> Result<(), String> {
        if self.columns.is_empty() {
            return Err("model declares no columns".to_string());
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name()) {
                return Err(format!("duplicate column '{}'", column.name()));
            }
            if let ColumnSpec::Categorical { name, categories } = column {
                if categories.is_empty() {
                    return Err(format!("categorical column '{}' has no categories", name));
                }
            }
        }

        if self.trees.is_empty() {
            return Err("model has no trees".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.check(self.columns.len())
                .map_err(|e| format!("tree {}: {}", t, e))?;
        }

        match self.task {
            Task::Classification => {
                if self.classes.is_empty() {
                    return Err("classifier declares no classes".to_string());
                }
                let n_classes = self.classes.len() as f64;
                for (t, tree) in self.trees.iter().enumerate() {
                    if let Some(bad) = tree
                        .leaves()
                        .find(|v| v.fract() != 0.0 || *v < 0.0 || *v >= n_classes)
                    {
                        return Err(format!("tree {}: leaf {} is not a class position", t, bad));
                    }
                }
            }
            Task::Regression => {
                if !self.base_score.is_finite() {
                    return Err("base_score must be finite".to_string());
                }
            }
        }

        Ok(())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnSpec::name)
    }

    fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        if let Some(extra) = row
            .column_names()
            .find(|name| !self.columns.iter().any(|c| c.name() == *name))
        {
            return Err(InferenceError::UnexpectedColumn(extra.to_string()));
        }

        self.columns
            .iter()
            .map(|column| {
                let value = row
                    .get(column.name())
                    .ok_or_else(|| InferenceError::MissingColumn(column.name().to_string()))?;
                column.encode(value)
            })
            .collect()
    }

    fn vote(&self, x: &[f64]) -> Result<ClassLabel, InferenceError> {
        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.evaluate(x)?;
            let slot = votes
                .get_mut(leaf as usize)
                .filter(|_| leaf >= 0.0 && leaf.fract() == 0.0)
                .ok_or_else(|| {
                    InferenceError::UnexpectedOutput(format!("leaf {} is not a class position", leaf))
                })?;
            *slot += 1;
        }

        let mut best = 0;
        for (position, count) in votes.iter().enumerate() {
            if *count > votes[best] {
                best = position;
            }
        }
        Ok(self.classes[best].clone())
    }

    fn average(&self, x: &[f64]) -> Result<f64, InferenceError> {
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(x)?;
        }
        Ok(self.base_score + total / self.trees.len() as f64)
    }
}

impl Model for TreeEnsemble {
    fn predict(&self, row: &FeatureRow) -> Result<ModelOutput, InferenceError> {
        let x = self.encode(row)?;
        match self.task {
            Task::Classification => self.vote(&x).map(ModelOutput::Class),
            Task::Regression => self.average(&x).map(ModelOutput::Value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SOIL_CLASSIFIER: &str = r#"{
        "task": "classification",
        "columns": [
            {"type": "numeric", "name": "N"},
            {"type": "categorical", "name": "Soil_Type", "categories": ["Clay", "Sandy"]}
        ],
        "classes": [0, 1, 2],
        "trees": [
            {"nodes": [
                {"feature": 0, "threshold": 50.0, "left": 1, "right": 2},
                {"value": 0},
                {"feature": 1, "threshold": 0.5, "left": 3, "right": 4},
                {"value": 1},
                {"value": 2}
            ]},
            {"nodes": [{"value": 2}]},
            {"nodes": [
                {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                {"value": 1},
                {"value": 0}
            ]}
        ]
    }"#;

    fn classifier() -> TreeEnsemble {
        let model: TreeEnsemble = serde_json::from_str(SOIL_CLASSIFIER).unwrap();
        model.check().unwrap();
        model
    }

    #[test]
    fn test_majority_vote() {
        let model = classifier();
        // tree votes: 2 (sandy, N>50), 2, 0 -> class 2
        let row = FeatureRow::new().number("N", 80.0).text("Soil_Type", "Sandy");
        assert_eq!(
            model.predict(&row).unwrap(),
            ModelOutput::Class(ClassLabel::Integer(2))
        );
    }

    #[test]
    fn test_tie_goes_to_lowest_class() {
        let model = classifier();
        // tree votes: 0, 2, 0
        let row = FeatureRow::new().number("N", 10.0).text("Soil_Type", "Sandy");
        assert_eq!(
            model.predict(&row).unwrap(),
            ModelOutput::Class(ClassLabel::Integer(0))
        );

        let mut tied = model.clone();
        tied.trees.truncate(2);
        // votes: 0 and 2, one each
        assert_eq!(
            tied.predict(&row).unwrap(),
            ModelOutput::Class(ClassLabel::Integer(0))
        );
    }

    #[test]
    fn test_column_contract() {
        let model = classifier();

        let missing = FeatureRow::new().number("N", 10.0);
        assert_eq!(
            model.predict(&missing),
            Err(InferenceError::MissingColumn("Soil_Type".into()))
        );

        let renamed = FeatureRow::new().number("Nitrogen", 10.0).text("Soil_Type", "Clay");
        assert_eq!(
            model.predict(&renamed),
            Err(InferenceError::UnexpectedColumn("Nitrogen".into()))
        );

        let unknown = FeatureRow::new().number("N", 10.0).text("Soil_Type", "Peat");
        assert!(matches!(
            model.predict(&unknown),
            Err(InferenceError::UnknownCategory { .. })
        ));

        let wrong_type = FeatureRow::new().text("N", "ten").text("Soil_Type", "Clay");
        assert!(matches!(
            model.predict(&wrong_type),
            Err(InferenceError::TypeMismatch { expected: "numeric", .. })
        ));
    }

    #[test]
    fn test_regression_average() {
        let model: TreeEnsemble = serde_json::from_str(
            r#"{
                "task": "regression",
                "columns": [{"type": "numeric", "name": "Rainfall(mm)"}],
                "base_score": 10.0,
                "trees": [
                    {"nodes": [
                        {"feature": 0, "threshold": 100.0, "left": 1, "right": 2},
                        {"value": 400.0},
                        {"value": 100.0}
                    ]},
                    {"nodes": [{"value": 200.0}]}
                ]
            }"#,
        )
        .unwrap();
        model.check().unwrap();

        let dry = FeatureRow::new().number("Rainfall(mm)", 0.0);
        assert_eq!(model.predict(&dry).unwrap(), ModelOutput::Value(310.0));
        let wet = FeatureRow::new().number("Rainfall(mm)", 250.0);
        assert_eq!(model.predict(&wet).unwrap(), ModelOutput::Value(160.0));
    }

    #[test]
    fn test_check_rejects_bad_structure() {
        let mut model = classifier();
        model.trees[0].nodes[0] = Node::Split {
            feature: 0,
            threshold: 1.0,
            left: 0,
            right: 2,
        };
        assert!(model.check().unwrap_err().contains("invalid child"));

        let mut model = classifier();
        model.trees[1].nodes[0] = Node::Leaf { value: 7.0 };
        assert!(model.check().unwrap_err().contains("not a class position"));

        let mut model = classifier();
        model.columns.push(ColumnSpec::Numeric { name: "N".into() });
        assert!(model.check().unwrap_err().contains("duplicate column"));

        let mut model = classifier();
        model.trees.clear();
        assert!(model.check().is_err());
    }

    #[test]
    fn test_from_path_errors_are_startup_errors() {
        let missing = TreeEnsemble::from_path(Domain::Crop, "/definitely/not/here.json");
        assert!(matches!(missing, Err(StartupError::Read { .. })));

        let mut garbage = NamedTempFile::new().unwrap();
        garbage.write_all(b"not json").unwrap();
        let err = TreeEnsemble::from_path(Domain::Fertilizer, garbage.path()).unwrap_err();
        assert!(matches!(err, StartupError::Decode { .. }));
        assert!(err.to_string().starts_with("Failed to load fertilizer model"));

        let mut valid = NamedTempFile::new().unwrap();
        valid.write_all(SOIL_CLASSIFIER.as_bytes()).unwrap();
        let model = TreeEnsemble::from_path(Domain::Crop, valid.path()).unwrap();
        assert_eq!(model.column_names().collect::<Vec<_>>(), vec!["N", "Soil_Type"]);
    }
}
