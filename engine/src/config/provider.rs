use std::io::ErrorKind;

pub trait ContentProvider {
    fn load(&self) -> Result<Option<String>, String>;
    fn save(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentProvider {
    file_path: String,
}

impl FileContentProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ContentProvider for FileContentProvider {
    // A missing file is not an error: callers fall back to defaults.
    fn load(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read {}: {}", self.file_path, err)),
        }
    }

    fn save(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|err| format!("Failed to write {}: {}", self.file_path, err))
    }
}
