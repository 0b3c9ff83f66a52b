use self::logger::Logger;
use clap::parser::ValueSource;
use hoop_truss::{Deploy, FoldingState, HoopTruss};
use std::{path::PathBuf, time::Instant};

mod logger;
mod render;

pub(crate) type AnyResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
pub(crate) struct Entry {
    #[clap(flatten)]
    deploy: Deploy,
    #[clap(flatten)]
    mech: MechArgs,
    /// Load the mechanism and the deployment from a RON file,
    /// the command line values take precedence
    #[clap(long)]
    cfg: Option<PathBuf>,
    /// Output path, an SVG file in static mode,
    /// a GIF file or a directory of SVG frames in animation mode
    #[clap(short, long)]
    out: Option<PathBuf>,
    /// Frame delay of the animation in milliseconds
    #[clap(long, default_value_t = 100)]
    delay: u32,
    /// Panel (frame) size in pixels
    #[clap(long, default_value_t = 800)]
    size: u32,
    /// Also dump the nodes of each state as CSV files into the directory
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Compute the sequence sequentially
    #[clap(long)]
    no_parallel: bool,
}

/// Mechanism parameters, the angles are in degrees.
#[derive(clap::Args)]
struct MechArgs {
    /// Number of scissor units
    #[clap(long)]
    unit: Option<usize>,
    /// Length of the scissor arm
    #[clap(long)]
    arm: Option<f64>,
    /// Height of the upper hoop plane
    #[clap(long, allow_negative_numbers = true)]
    upper: Option<f64>,
    /// Height of the lower hoop plane
    #[clap(long, allow_negative_numbers = true)]
    lower: Option<f64>,
    /// Folded angle bound in degrees
    #[clap(long)]
    folded: Option<f64>,
    /// Deployed angle bound in degrees
    #[clap(long)]
    deployed: Option<f64>,
}

impl MechArgs {
    fn apply(&self, hoop: &mut HoopTruss) {
        let Self { unit, arm, upper, lower, folded, deployed } = *self;
        macro_rules! set {
            ($($field:ident $(=> $f:ident)?),+) => {$(
                if let Some(v) = $field {
                    hoop.$field = v $(.$f())?;
                }
            )+};
        }
        set!(unit, arm, upper, lower, folded => to_radians, deployed => to_radians);
    }
}

/// Content of the configuration file.
#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct Cfg {
    hoop: HoopTruss,
    deploy: Deploy,
}

impl Entry {
    pub(super) fn main() {
        register_panic_hook();
        let args = <Self as clap::CommandFactory>::command().get_matches_from(wild::args());
        let entry = <Self as clap::FromArgMatches>::from_arg_matches(&args)
            .unwrap_or_else(|e| e.exit());
        let given = |id: &str| matches!(args.value_source(id), Some(ValueSource::CommandLine));
        if let Err(e) = entry.run(given) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    fn load(&self, given: impl Fn(&str) -> bool) -> AnyResult<Cfg> {
        let mut cfg = match &self.cfg {
            Some(path) => {
                let mut cfg = ron::from_str::<Cfg>(&std::fs::read_to_string(path)?)?;
                let Deploy { mode, states, frames } = self.deploy;
                if given("mode") {
                    cfg.deploy.mode = mode;
                }
                if given("states") {
                    cfg.deploy.states = states;
                }
                if given("frames") {
                    cfg.deploy.frames = frames;
                }
                cfg
            }
            None => Cfg { hoop: HoopTruss::default(), deploy: self.deploy.clone() },
        };
        self.mech.apply(&mut cfg.hoop);
        Ok(cfg)
    }

    fn run(self, given: impl Fn(&str) -> bool) -> AnyResult {
        // Invalid modes are rejected here, before any geometry
        let cfg = self.load(given)?;
        let mut logger = Logger::new(std::io::stdout().lock());
        logger.top_title(APP_NAME)?;
        logger.log(&cfg)?;
        if let Err(e) = cfg.hoop.check() {
            eprintln!("Warning: {e}");
        }
        let Cfg { hoop, deploy } = cfg;
        let t0 = Instant::now();
        let states = if self.no_parallel {
            deploy.run(&hoop)
        } else {
            par_run(&deploy, &hoop)
        };
        if states.is_empty() {
            eprintln!("Warning: no state is generated");
        }
        logger.title("states")?;
        for state in &states {
            logger.log(&Record::new(state, hoop.arm))?;
        }
        if let Some(dir) = &self.csv {
            let files = render::dump_csv(dir, &states)?;
            logger.title("csv")?;
            logger.kv("dir", dir.display().to_string())?;
            logger.kv("files", files)?;
        }
        logger.flush()?;
        let opt = render::Output { out: self.out, size: self.size, delay: self.delay };
        let path = render::render(deploy.mode, &states, opt)?;
        logger.title("output")?;
        logger.kv("path", path.display().to_string())?;
        logger.kv("time", format!("{:?}", t0.elapsed()))?;
        logger.flush()?;
        println!("Done");
        Ok(())
    }
}

/// Summary of a folding state.
#[derive(serde::Serialize)]
struct Record {
    phi: f64,
    chord: f64,
    radius: f64,
    residual: f64,
}

impl Record {
    fn new(state: &FoldingState, arm: f64) -> Self {
        Self {
            phi: state.degrees(),
            chord: state.chord,
            radius: state.radius,
            residual: state.arm_residual(arm),
        }
    }
}

#[cfg(feature = "parallel")]
fn par_run(deploy: &Deploy, hoop: &HoopTruss) -> Vec<FoldingState> {
    deploy.par_run(hoop)
}

#[cfg(not(feature = "parallel"))]
fn par_run(deploy: &Deploy, hoop: &HoopTruss) -> Vec<FoldingState> {
    deploy.run(hoop)
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => eprintln!("{info}"),
        }
        std::process::exit(1);
    }));
}
