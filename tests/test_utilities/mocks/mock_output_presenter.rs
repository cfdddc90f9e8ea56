use containersec::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock OutputPresenter that keeps every presented line
#[derive(Default, Clone)]
pub struct MockOutputPresenter {
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl MockOutputPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputPresenter for MockOutputPresenter {
    fn present(&self, line: &str) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}
