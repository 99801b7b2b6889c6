//! Filesystem storage for uploaded photographs.
//!
//! Uploads land in a single capability-scoped directory, named from the
//! subject's sanitised name plus a random suffix so resubmissions never
//! collide.

use std::io::{self, Write};
use std::path::Path;

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

/// Upload directory handle.
#[derive(Debug)]
pub struct PhotoStore {
    dir: Dir,
    dir_name: String,
}

impl PhotoStore {
    /// Open (creating if necessary) the upload directory.
    pub fn open(upload_dir: impl AsRef<Path>) -> io::Result<Self> {
        let upload_dir = upload_dir.as_ref();
        std::fs::create_dir_all(upload_dir)?;
        let dir = Dir::open_ambient_dir(upload_dir, ambient_authority())?;
        Ok(Self {
            dir,
            dir_name: upload_dir.to_string_lossy().into_owned(),
        })
    }

    /// Store photo bytes for a subject, returning the recorded path.
    pub fn store(&self, subject_name: &str, bytes: &[u8]) -> io::Result<String> {
        let suffix: [u8; 4] = rand::random();
        let file_name = format!("{}_{}.jpg", sanitise(subject_name), hex::encode(suffix));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(&file_name, &options)?;
        file.write_all(bytes)?;
        file.sync_all()?;

        Ok(format!("{}/{file_name}", self.dir_name))
    }
}

fn sanitise(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.chars().all(|c| c == '_') {
        "unknown".to_owned()
    } else {
        cleaned
    }
}
