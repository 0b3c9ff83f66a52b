use super::AnyResult;
use hoop_truss::{
    plot::{self, Animation, Opt},
    FoldingState, Mode,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    ffi::OsStr,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

pub(super) struct Output {
    pub(super) out: Option<PathBuf>,
    pub(super) size: u32,
    pub(super) delay: u32,
}

/// Render the states, return the output path.
pub(super) fn render(mode: Mode, states: &[FoldingState], opt: Output) -> AnyResult<PathBuf> {
    let Output { out, size, delay } = opt;
    match mode {
        Mode::Static => {
            let path = out.unwrap_or_else(|| PathBuf::from("hoop-truss.svg"));
            let width = size * states.len().max(1) as u32;
            let svg = plot::SVGBackend::new(&path, (width, size));
            let opt = Opt { legend: true, ..Opt::default() };
            plot::snapshots(svg, states, opt)?;
            Ok(path)
        }
        Mode::Anim => {
            let path = out.unwrap_or_else(|| PathBuf::from("hoop-truss.gif"));
            if path.extension().and_then(OsStr::to_str) == Some("gif") {
                gif(&path, states, size, delay)?;
            } else {
                let pb = progress(states.len());
                pb.set_message("SVG frames");
                let opt = Opt::default();
                plot::svg_frames_with(&path, states, (size, size), opt, |_| pb.inc(1))?;
                pb.finish_and_clear();
            }
            Ok(path)
        }
    }
}

fn gif(path: &Path, states: &[FoldingState], size: u32, delay: u32) -> AnyResult {
    // Encode in memory, the trailer is written on drop
    let mut buf = Vec::new();
    let mut anim =
        Animation::new(&mut buf, (size, size), delay)?.bound(plot::common_bound(states));
    let pb = progress(states.len());
    pb.set_message("GIF frames");
    for state in states {
        anim.push(state)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    anim.finish();
    std::fs::write(path, buf)?;
    Ok(())
}

fn progress(len: usize) -> ProgressBar {
    const STYLE: &str = "{msg} {elapsed_precise} {wide_bar} {pos}/{len}";
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(STYLE) {
        pb.set_style(style);
    }
    pb
}

/// Write the nodes of each state into `dir`, return the number of files.
pub(super) fn dump_csv(dir: &Path, states: &[FoldingState]) -> AnyResult<usize> {
    std::fs::create_dir_all(dir)?;
    let width = states.len().to_string().len();
    for (i, state) in states.iter().enumerate() {
        let file = File::create(dir.join(format!("state_{i:0width$}.csv")))?;
        hoop_truss::csv::write_nodes(BufWriter::new(file), state)?;
    }
    Ok(states.len())
}
