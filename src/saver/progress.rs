/*
progress.rs

Copyright 2025 The Connection contributors

This file is part of Connection.

Connection is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Connection is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Connection. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the player progress.
//!
//! The saved object is a serialization of the [`Progress`] object in JSON format by
//! using [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::progress::Progress;

/// Object to save and restore the player progress.
pub struct SaverProgress {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverProgress {
    /// Create a [`SaverProgress`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the progress must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("progress.json");
        debug!("Progress file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Progress`] object from the progress file.
    ///
    /// Return the [`Progress`] object or None if the progress file does not exist.
    pub fn get_progress(&self) -> Result<Option<Progress>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let progress: Progress = serde_json::from_reader(reader)?;
        Ok(Some(progress))
    }

    /// Save the provided [`Progress`] object.
    ///
    /// The data directory is created if it does not exist.
    pub fn save_progress(&self, progress: &Progress) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, progress)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the progress file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
