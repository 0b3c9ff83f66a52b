//! Render the deployment of a hoop truss as snapshots or an animation.
mod cli;

fn main() {
    cli::Entry::main();
}
