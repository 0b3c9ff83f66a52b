//! Functions for writing the node coordinates in CSV format.
use crate::FoldingState;
pub use csv::Error;
use csv::Writer;

#[derive(serde::Serialize)]
struct Row {
    kind: &'static str,
    index: usize,
    x: f64,
    y: f64,
    z: f64,
}

/// Write the nodes of the folding state, one row per node.
///
/// The columns are `kind, index, x, y, z`.
pub fn write_nodes<W>(w: W, state: &FoldingState) -> Result<(), Error>
where
    W: std::io::Write,
{
    let mut w = Writer::from_writer(w);
    for (kind, index, [x, y, z]) in state.nodes() {
        w.serialize(Row { kind, index, x, y, z })?;
    }
    w.flush()?;
    Ok(())
}

/// Dump the nodes of the folding state to string.
pub fn dump_nodes(state: &FoldingState) -> Result<String, Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    write_nodes(&mut buf, state)?;
    Ok(String::from_utf8(buf)?)
}
