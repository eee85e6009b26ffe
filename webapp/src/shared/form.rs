use std::{collections::BTreeMap, fmt};

use serde_json::{Map, Value};

/// Named form controls holding JSON values, unset controls hold `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormGroup {
    controls: BTreeMap<String, Value>,
}

impl FormGroup {
    pub fn group(names: &[&str]) -> Self {
        Self {
            controls: names
                .iter()
                .map(|name| (name.to_string(), Value::Null))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controls.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.controls.get(name)
    }

    /// Copies the object's entries into matching controls. Keys without a
    /// control are ignored, so are non-object values.
    pub fn patch_value(&mut self, value: Value) {
        let Value::Object(entries) = value else {
            return;
        };
        for (name, value) in entries {
            if let Some(control) = self.controls.get_mut(&name) {
                *control = value;
            }
        }
    }

    pub fn value(&self) -> Value {
        Value::Object(
            self.controls
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Files picked in a file input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInputEvent {
    pub files: Vec<SelectedFile>,
}

impl FileInputEvent {
    pub fn new(file: SelectedFile) -> Self {
        Self { files: vec![file] }
    }
}

impl fmt::Display for FileInputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.files.iter().map(|file| file.name.as_str()).collect();
        write!(f, "FileInputEvent[{}]", names.join(", "))
    }
}
