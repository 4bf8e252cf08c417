use std::{path::PathBuf, sync::Arc};

use crate::classifier::EmailClassifier;

#[derive(Clone)]
pub struct ServerState {
    classifier: Arc<EmailClassifier>,
    index_path: PathBuf,
}

impl From<(Arc<EmailClassifier>, PathBuf)> for ServerState {
    fn from(states: (Arc<EmailClassifier>, PathBuf)) -> Self {
        let (classifier, index_path) = states;
        Self {
            classifier,
            index_path,
        }
    }
}

impl ServerState {
    pub fn classifier(&self) -> &EmailClassifier {
        &self.classifier
    }

    pub fn index_path(&self) -> &PathBuf {
        &self.index_path
    }
}
