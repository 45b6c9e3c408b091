//! Shader sources for the built-in programs.
//! Six fixed entries (three vertex/fragment pairs), resolved by name.

use std::{borrow::Cow, fmt, fs, path::Path, str::FromStr, sync::OnceLock};

use anyhow::Context;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("Shader '{0}' undefined")]
    UnknownShaderName(String),
    #[error("Shader program '{0}' undefined")]
    UnknownProgramName(String),
    #[error("No source supplied for shader '{0}'")]
    MissingShader(ShaderName),
    #[error("Source for shader '{0}' supplied more than once")]
    DuplicateShader(ShaderName),
}

pub type ShaderResult<T> = Result<T, ShaderError>;

/// Pipeline stage. Derived from the name, never from the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// File extension used for this stage in the shader directory.
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Fragment => "fs",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// The closed set of shader names the registry knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderName {
    VertexColorVs,
    VertexColorFs,
    PhongVs,
    PhongFs,
    PlanetVs,
    PlanetFs,
}

impl ShaderName {
    pub const COUNT: usize = 6;

    /// All names in declaration order.
    pub const ALL: [ShaderName; Self::COUNT] = [
        ShaderName::VertexColorVs,
        ShaderName::VertexColorFs,
        ShaderName::PhongVs,
        ShaderName::PhongFs,
        ShaderName::PlanetVs,
        ShaderName::PlanetFs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShaderName::VertexColorVs => "vertex_color_vs",
            ShaderName::VertexColorFs => "vertex_color_fs",
            ShaderName::PhongVs => "phong_vs",
            ShaderName::PhongFs => "phong_fs",
            ShaderName::PlanetVs => "planet_vs",
            ShaderName::PlanetFs => "planet_fs",
        }
    }

    /// Source file name, relative to the shader directory (e.g. `phong.vs`).
    pub fn file_name(self) -> String {
        format!("{}.{}", self.program(), self.stage().extension())
    }

    pub fn stage(self) -> ShaderStage {
        match self {
            ShaderName::VertexColorVs | ShaderName::PhongVs | ShaderName::PlanetVs => {
                ShaderStage::Vertex
            }
            ShaderName::VertexColorFs | ShaderName::PhongFs | ShaderName::PlanetFs => {
                ShaderStage::Fragment
            }
        }
    }

    pub fn program(self) -> ShaderProgram {
        match self {
            ShaderName::VertexColorVs | ShaderName::VertexColorFs => ShaderProgram::VertexColor,
            ShaderName::PhongVs | ShaderName::PhongFs => ShaderProgram::Phong,
            ShaderName::PlanetVs | ShaderName::PlanetFs => ShaderProgram::Planet,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ShaderName {
    type Err = ShaderError;

    /// Exact, case-sensitive match against the known names.
    fn from_str(s: &str) -> ShaderResult<Self> {
        match s {
            "vertex_color_vs" => Ok(ShaderName::VertexColorVs),
            "vertex_color_fs" => Ok(ShaderName::VertexColorFs),
            "phong_vs" => Ok(ShaderName::PhongVs),
            "phong_fs" => Ok(ShaderName::PhongFs),
            "planet_vs" => Ok(ShaderName::PlanetVs),
            "planet_fs" => Ok(ShaderName::PlanetFs),
            other => Err(ShaderError::UnknownShaderName(other.to_owned())),
        }
    }
}

impl fmt::Display for ShaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vertex/fragment pair sharing a name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    VertexColor,
    Phong,
    Planet,
}

impl ShaderProgram {
    pub const ALL: [ShaderProgram; 3] = [
        ShaderProgram::VertexColor,
        ShaderProgram::Phong,
        ShaderProgram::Planet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShaderProgram::VertexColor => "vertex_color",
            ShaderProgram::Phong => "phong",
            ShaderProgram::Planet => "planet",
        }
    }

    pub fn vertex(self) -> ShaderName {
        match self {
            ShaderProgram::VertexColor => ShaderName::VertexColorVs,
            ShaderProgram::Phong => ShaderName::PhongVs,
            ShaderProgram::Planet => ShaderName::PlanetVs,
        }
    }

    pub fn fragment(self) -> ShaderName {
        match self {
            ShaderProgram::VertexColor => ShaderName::VertexColorFs,
            ShaderProgram::Phong => ShaderName::PhongFs,
            ShaderProgram::Planet => ShaderName::PlanetFs,
        }
    }
}

impl FromStr for ShaderProgram {
    type Err = ShaderError;

    fn from_str(s: &str) -> ShaderResult<Self> {
        match s {
            "vertex_color" => Ok(ShaderProgram::VertexColor),
            "phong" => Ok(ShaderProgram::Phong),
            "planet" => Ok(ShaderProgram::Planet),
            other => Err(ShaderError::UnknownProgramName(other.to_owned())),
        }
    }
}

impl fmt::Display for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn embedded_source(name: ShaderName) -> &'static str {
    match name {
        ShaderName::VertexColorVs => include_str!("../shaders/vertex_color.vs"),
        ShaderName::VertexColorFs => include_str!("../shaders/vertex_color.fs"),
        ShaderName::PhongVs => include_str!("../shaders/phong.vs"),
        ShaderName::PhongFs => include_str!("../shaders/phong.fs"),
        ShaderName::PlanetVs => include_str!("../shaders/planet.vs"),
        ShaderName::PlanetFs => include_str!("../shaders/planet.fs"),
    }
}

/// Immutable name -> source registry holding exactly one text per [`ShaderName`].
#[derive(Clone, Debug)]
pub struct Shaders {
    sources: [Cow<'static, str>; ShaderName::COUNT],
}

impl Shaders {
    /// Registry backed by the sources compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            sources: ShaderName::ALL.map(|name| Cow::Borrowed(embedded_source(name))),
        }
    }

    /// Build a registry from externally supplied `(name, source)` pairs.
    /// Order does not matter, but every name must appear exactly once.
    pub fn from_sources<I, N, S>(entries: I) -> ShaderResult<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: Into<Cow<'static, str>>,
    {
        let mut slots: [Option<Cow<'static, str>>; ShaderName::COUNT] = Default::default();

        for (name, source) in entries {
            let name: ShaderName = name.as_ref().parse()?;
            let slot = &mut slots[name.index()];
            if slot.is_some() {
                return Err(ShaderError::DuplicateShader(name));
            }
            *slot = Some(source.into());
        }

        if let Some(missing) = ShaderName::ALL
            .into_iter()
            .find(|name| slots[name.index()].is_none())
        {
            return Err(ShaderError::MissingShader(missing));
        }

        Ok(Self {
            sources: slots.map(Option::unwrap_or_default),
        })
    }

    /// Read every shader from `dir`, using [`ShaderName::file_name`] for each entry.
    pub fn load_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        log::info!("Loading shaders from {:?}", dir);

        let mut entries = Vec::with_capacity(ShaderName::COUNT);
        for name in ShaderName::ALL {
            let path = dir.join(name.file_name());
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read shader {}: {}", name, path.display()))?;
            log::debug!("Loaded {} shader {} ({} bytes)", name.stage(), name, source.len());
            entries.push((name.as_str(), source));
        }

        let shaders = Self::from_sources(entries)?;
        log::info!("Loaded {} shaders from {:?}", ShaderName::COUNT, dir);
        Ok(shaders)
    }

    /// Source for a known name. Empty text counts as undefined.
    pub fn get(&self, name: ShaderName) -> ShaderResult<&str> {
        let source = self.sources[name.index()].as_ref();
        if source.is_empty() {
            return Err(ShaderError::UnknownShaderName(name.as_str().to_owned()));
        }
        Ok(source)
    }

    /// Resolve a symbolic name such as `"phong_fs"` to its source text.
    pub fn lookup(&self, name: &str) -> ShaderResult<&str> {
        self.get(name.parse()?)
    }

    /// Vertex and fragment sources of a program, in that order.
    pub fn program(&self, program: ShaderProgram) -> ShaderResult<(&str, &str)> {
        Ok((self.get(program.vertex())?, self.get(program.fragment())?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShaderName, &str)> {
        ShaderName::ALL
            .into_iter()
            .map(move |name| (name, self.sources[name.index()].as_ref()))
    }
}

/// Process-wide registry of the embedded sources, initialized on first use.
pub fn shaders() -> &'static Shaders {
    static EMBEDDED: OnceLock<Shaders> = OnceLock::new();
    EMBEDDED.get_or_init(|| {
        log::debug!("Initializing embedded shader registry");
        Shaders::embedded()
    })
}

/// [`Shaders::lookup`] against the embedded registry.
pub fn lookup(name: &str) -> ShaderResult<&'static str> {
    shaders().lookup(name)
}
