//! Shader dump tool.
//! Prints built-in shader sources by name; logging + `--key=value` flags.

use std::path::PathBuf;

use anyhow::Result;
use asset::{ShaderName, ShaderProgram, Shaders};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    List,
    Shader(String),
    Program(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    shader_dir: Option<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Args {
    // Accept: --shader=<name> | --program=<name> | --list ; last one wins
    // plus --shader-dir=<path>
    let mut parsed = Args {
        command: Command::List,
        shader_dir: None,
    };
    for arg in args {
        if let Some(val) = arg.strip_prefix("--shader=") {
            parsed.command = Command::Shader(val.to_owned());
        } else if let Some(val) = arg.strip_prefix("--program=") {
            parsed.command = Command::Program(val.to_owned());
        } else if let Some(val) = arg.strip_prefix("--shader-dir=") {
            parsed.shader_dir = Some(PathBuf::from(val));
        } else if arg == "--list" {
            parsed.command = Command::List;
        }
    }
    parsed
}

fn render(shaders: &Shaders, command: &Command) -> Result<String> {
    let out: String = match command {
        Command::List => ShaderName::ALL
            .iter()
            .map(|name| format!("{}\t{}\n", name, name.stage()))
            .collect(),
        Command::Shader(name) => shaders.lookup(name)?.to_owned(),
        Command::Program(name) => {
            let program: ShaderProgram = name.parse()?;
            let (vs, fs) = shaders.program(program)?;
            format!(
                "// {}\n{}\n// {}\n{}",
                program.vertex(),
                vs,
                program.fragment(),
                fs
            )
        }
    };
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        command,
        shader_dir,
    } = parse_args(std::env::args().skip(1));
    log::info!("Command: {:?}, shader_dir={:?}", command, shader_dir);

    let loaded;
    let shaders: &Shaders = match shader_dir {
        Some(dir) => {
            loaded = Shaders::load_dir(dir)?;
            &loaded
        }
        None => asset::shader::shaders(),
    };

    print!("{}", render(shaders, &command)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_list() {
        let parsed = parse_args(args(&[]));
        assert_eq!(parsed.command, Command::List);
        assert_eq!(parsed.shader_dir, None);
    }

    #[test]
    fn parses_flags() {
        assert_eq!(
            parse_args(args(&["--list", "--shader=phong_fs"])).command,
            Command::Shader("phong_fs".into())
        );
        assert_eq!(
            parse_args(args(&["--program=planet"])).command,
            Command::Program("planet".into())
        );
    }

    #[test]
    fn parses_command_and_dir_in_one_pass() {
        let parsed = parse_args(args(&[
            "--shader-dir=/tmp/shaders",
            "--shader=planet_fs",
            "--verbose",
        ]));
        assert_eq!(
            parsed,
            Args {
                command: Command::Shader("planet_fs".into()),
                shader_dir: Some(PathBuf::from("/tmp/shaders")),
            }
        );
    }

    #[test]
    fn renders_shader_verbatim() {
        let shaders = Shaders::embedded();
        let out = render(&shaders, &Command::Shader("phong_fs".into())).unwrap();
        assert_eq!(out, shaders.lookup("phong_fs").unwrap());
    }

    #[test]
    fn renders_program_with_headers() {
        let shaders = Shaders::embedded();
        let out = render(&shaders, &Command::Program("vertex_color".into())).unwrap();
        assert!(out.starts_with("// vertex_color_vs\n"));
        assert!(out.contains("\n// vertex_color_fs\n"));
    }

    #[test]
    fn list_has_one_line_per_shader() {
        let out = render(&Shaders::embedded(), &Command::List).unwrap();
        assert_eq!(out.lines().count(), ShaderName::COUNT);
        assert!(out.contains("planet_fs\tfragment"));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = render(&Shaders::embedded(), &Command::Shader("bogus_vs".into())).unwrap_err();
        assert_eq!(err.to_string(), "Shader 'bogus_vs' undefined");
    }
}
