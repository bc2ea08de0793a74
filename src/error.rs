use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while opening an image
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur while writing the displayed image
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("no image is loaded")]
    NothingToSave,
    #[error("unsupported output format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
