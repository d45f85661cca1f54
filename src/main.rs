use addc::stage::codegen::{CodeGenerator, TextSink};
use addc::stage::interpret::Interpreter;
use addc::stage::CompilationStage;
use scrap::prelude::v1::*;
use std::env;
use std::fs::File;
use std::io::prelude::*;

type RuntimeResult<T> = Result<T, RuntimeError>;

/// Environment variable holding the maximum log level.
const LOG_LEVEL_ENV: &str = "ADDC_LOG";

/// Represents an error that can return an exit code.
trait ErrorWithExitCode {
    /// Returns an exit status for a given error;
    fn exit_code(&self) -> i32;
}

#[derive(Debug, thiserror::Error)]
enum RuntimeError {
    #[error("source file unreadable")]
    FileUnreadable,
    #[error("unknown mode: {0}, expected one of: compile, eval")]
    InvalidMode(String),
    #[error("{0}")]
    Parse(#[from] addc::parser::ParseError),
    #[error("{0}")]
    Undefined(String),
}

impl ErrorWithExitCode for RuntimeError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::FileUnreadable => 1,
            Self::InvalidMode(_) => 64,
            Self::Parse(_) => 65,
            Self::Undefined(_) => 127,
        }
    }
}

/// Selects which consumer receives the parsed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Compile,
    Eval,
}

impl std::str::FromStr for Mode {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(Self::Compile),
            "eval" => Ok(Self::Eval),
            other => Err(RuntimeError::InvalidMode(other.to_string())),
        }
    }
}

fn read_src_file(filename: &str) -> RuntimeResult<String> {
    let mut contents = String::new();
    let res = if filename == "-" {
        std::io::stdin().read_to_string(&mut contents)
    } else {
        let mut f = File::open(filename).map_err(|_| RuntimeError::FileUnreadable)?;
        f.read_to_string(&mut contents)
    };

    match res {
        Ok(_) => Ok(contents),
        Err(e) => Err(RuntimeError::Undefined(e.to_string())),
    }
}

fn run(source: &str, mode: Mode) -> RuntimeResult<()> {
    let expr = addc::parse_source(source)?;

    match mode {
        Mode::Compile => {
            let stdout = std::io::stdout();
            let mut generator = CodeGenerator::new(TextSink::new(stdout.lock()));
            generator
                .apply(&expr)
                .map_err(|e| RuntimeError::Undefined(e.to_string()))
        }
        Mode::Eval => match Interpreter.apply(&expr) {
            Ok(value) => {
                println!("{}", value);
                Ok(())
            }
            Err(never) => match never {},
        },
    }
}

fn init_logger() {
    let level = env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::WARN);

    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn main() {
    init_logger();

    let raw_args: Vec<String> = env::args().collect::<Vec<String>>();
    let args = raw_args.iter().map(|a| a.as_str()).collect::<Vec<&str>>();

    let cmd = scrap::Cmd::new("addc")
        .description("Compiles chains of integer addition into stack machine instructions.")
        .author("Nate Catelli <ncatelli@packetfire.org>")
        .version("0.1.0")
        .with_flag(scrap::Flag::expect_string(
            "in-file",
            "i",
            "an input path for a source file, or - for stdin.",
        ))
        .with_flag(
            scrap::Flag::expect_string("mode", "m", "the output mode, compile or eval.")
                .optional()
                .with_default("compile".to_string()),
        )
        .with_handler(|(inf, mode)| {
            let mode = mode.parse::<Mode>()?;
            read_src_file(&inf).and_then(|input| run(&input, mode))
        });

    let help_string = cmd.help();
    let eval_res = cmd
        .evaluate(&args[..])
        .map_err(|e| RuntimeError::Undefined(e.to_string()))
        .and_then(|flags| cmd.dispatch(flags));

    match eval_res {
        Ok(_) => (),
        Err(RuntimeError::FileUnreadable) => {
            eprintln!("unknown input file\n{}", &help_string);
            std::process::exit(RuntimeError::FileUnreadable.exit_code())
        }
        Err(e @ RuntimeError::Parse(_)) => {
            eprintln!("parse error: {}", e);
            std::process::exit(e.exit_code())
        }
        Err(e) => {
            eprintln!("{}\n{}", e, &help_string);
            std::process::exit(e.exit_code())
        }
    }
}
