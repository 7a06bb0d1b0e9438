use std::{env, fs, process};

use enigma_engine::{
    Contact, EnigmaError, MachineModel, MachineSettings, NullTracer, SignalPath, SignalTracer,
    Stage,
};

const USAGE: &str = "usage: enigma [--settings FILE] [--model Enigma1|M3|M4] [--rotors I,II,III] \
[--reflector B] [--rings AAA] [--positions AAA] [--plugs \"AB CD\"] [--trace] [--debug] TEXT...";

fn main() {
    if let Err(err) = run() {
        eprintln!("enigma failed: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = CliArgs::parse()?;
    if args.debug {
        log::set_logger(&STDERR_LOGGER)
            .map(|()| log::set_max_level(log::LevelFilter::Debug))
            .map_err(|e| CliError::Usage(e.to_string()))?;
    }

    let settings = args.settings()?;
    let text = args.text.join(" ");
    let cipher = if args.trace {
        let mut path = SignalPath::with_tracer(StderrTracer);
        settings.apply(&mut path)?;
        path.encrypt_text(&text)?
    } else {
        let mut path = SignalPath::with_tracer(NullTracer);
        settings.apply(&mut path)?;
        path.encrypt_text(&text)?
    };

    println!("{}", group_letters(&cipher, 5));
    Ok(())
}

/// Splits `text` into space-separated groups of `size` letters.
fn group_letters(text: &str, size: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default)]
struct CliArgs {
    settings_file: Option<String>,
    model: Option<MachineModel>,
    rotors: Option<Vec<String>>,
    reflector: Option<String>,
    rings: Option<String>,
    positions: Option<String>,
    plugs: Option<String>,
    trace: bool,
    debug: bool,
    text: Vec<String>,
}

impl CliArgs {
    fn parse() -> Result<Self, CliError> {
        let mut parsed = CliArgs::default();
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--trace" => parsed.trace = true,
                "--debug" => parsed.debug = true,
                "-h" | "--help" => return Err(CliError::Usage(USAGE.to_string())),
                "--settings" => parsed.settings_file = Some(value(&arg, args.next())?),
                "--model" => parsed.model = Some(value(&arg, args.next())?.parse()?),
                "--rotors" => {
                    let list = value(&arg, args.next())?;
                    parsed.rotors = Some(list.split(',').map(|r| r.trim().to_string()).collect());
                }
                "--reflector" => parsed.reflector = Some(value(&arg, args.next())?),
                "--rings" => parsed.rings = Some(value(&arg, args.next())?),
                "--positions" => parsed.positions = Some(value(&arg, args.next())?),
                "--plugs" => parsed.plugs = Some(value(&arg, args.next())?),
                flag if flag.starts_with("--") => {
                    return Err(CliError::Usage(format!("unknown option {flag}\n{USAGE}")))
                }
                _ => parsed.text.push(arg.clone()),
            }
        }
        if parsed.text.is_empty() {
            return Err(CliError::Usage(USAGE.to_string()));
        }
        Ok(parsed)
    }

    /// Key sheet from `--settings`, overridden by individual flags.
    fn settings(&self) -> Result<MachineSettings, CliError> {
        let mut settings = match &self.settings_file {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| CliError::Usage(format!("cannot read {path}: {e}")))?;
                MachineSettings::from_json(&json)?
            }
            None => MachineSettings::new(MachineModel::Enigma1, &["I", "II", "III"], "B"),
        };

        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(rotors) = &self.rotors {
            settings.rotors = rotors.clone();
        }
        if let Some(reflector) = &self.reflector {
            settings.reflector = reflector.clone();
        }
        if let Some(rings) = &self.rings {
            settings.rings = Some(rings.clone());
        }
        if let Some(positions) = &self.positions {
            settings.positions = Some(positions.clone());
        }
        if let Some(plugs) = &self.plugs {
            settings.plugs = plugs.split_whitespace().map(str::to_string).collect();
        }
        Ok(settings)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, CliError> {
    next.ok_or_else(|| CliError::Usage(format!("{flag} needs a value\n{USAGE}")))
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Machine(#[from] EnigmaError),
}

/// Prints every pipeline stage to stderr.
struct StderrTracer;

impl SignalTracer for StderrTracer {
    fn rotor_positions(&mut self, label: &str, positions: &[Contact]) {
        let window: String = positions.iter().map(|c| c.to_char()).collect();
        eprintln!("[TRACE] {} {}", label, window);
    }

    fn signal(&mut self, stage: Stage<'_>, input: Contact, output: Contact) {
        eprintln!("[TRACE] {}: {} -> {}", stage, input, output);
    }
}

struct StderrLogger;

static STDERR_LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
