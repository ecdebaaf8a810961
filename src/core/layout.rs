//! Source/build directory conventions.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A recognized directory convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// `build/<build_type>` with generated files under `generators/`.
    #[serde(rename = "cmake_layout")]
    Cmake,
    /// `build-<build_type>` next to the sources.
    #[serde(rename = "basic_layout")]
    Basic,
    /// Bazel's single `bazel-build` output tree.
    #[serde(rename = "bazel_layout")]
    Bazel,
}

impl Layout {
    pub const ALL: &'static [Layout] = &[Layout::Cmake, Layout::Basic, Layout::Bazel];

    /// Look up a layout by its symbolic name.
    pub fn from_name(name: &str) -> Option<Layout> {
        Layout::ALL.iter().copied().find(|l| l.as_str() == name)
    }

    /// Symbolic names of every recognized layout.
    pub fn recognized() -> Vec<&'static str> {
        Layout::ALL.iter().map(Layout::as_str).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Cmake => "cmake_layout",
            Layout::Basic => "basic_layout",
            Layout::Bazel => "bazel_layout",
        }
    }

    /// Resolve the folders this layout selects, relative to the recipe root.
    pub fn folders(&self, build_type: &str) -> Folders {
        match self {
            Layout::Cmake => {
                let build = Path::new("build").join(build_type);
                Folders {
                    source: PathBuf::from("."),
                    generators: build.join("generators"),
                    build,
                }
            }
            Layout::Basic => {
                let build = PathBuf::from(format!("build-{}", build_type.to_lowercase()));
                Folders {
                    source: PathBuf::from("."),
                    generators: build.join("conan"),
                    build,
                }
            }
            Layout::Bazel => {
                let build = PathBuf::from("bazel-build");
                Folders {
                    source: PathBuf::from("."),
                    generators: build.join("conan"),
                    build,
                }
            }
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Folders selected by a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folders {
    pub source: PathBuf,
    pub build: PathBuf,
    pub generators: PathBuf,
}

impl Folders {
    /// Anchor every folder at `root`.
    pub fn under(&self, root: &Path) -> Folders {
        Folders {
            source: root.join(&self.source),
            build: root.join(&self.build),
            generators: root.join(&self.generators),
        }
    }
}
