//! Generates a random geometric graph and writes it out as an
//! adjacency/group file pair in the plaintext format accepted by the
//! graph loader.

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;
use structopt::StructOpt;

use geograph::{gen, graphio};

/// Sample a random geometric graph over the unit hypercube.
///
/// Writes `<out>.adj.txt` and `<out>.group.txt` next to the given output
/// prefix, then prints degree and group summary statistics.
#[derive(Debug, StructOpt)]
#[structopt(name = "generate", about = "Sample a random geometric graph.")]
struct Opt {
    /// Output path prefix for the graph files.
    #[structopt(long)]
    out: PathBuf,

    /// Number of points generated.
    #[structopt(long, default_value = "1000")]
    nvertices: usize,

    /// Number of dimensions of the hypercube.
    #[structopt(long, default_value = "3")]
    dims: usize,

    /// Number of distinct groups.
    #[structopt(long, default_value = "5")]
    ngroups: u32,

    /// Distance threshold for adjacency.
    #[structopt(long, default_value = "0.2")]
    radius: f64,

    /// Random sampling seed.
    #[structopt(long, default_value = "0")]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let gen_start = Instant::now();
    let records = gen::generate(opt.nvertices, opt.dims, opt.ngroups, opt.radius, opt.seed);

    let mut group_counts = vec![0usize; opt.ngroups as usize];
    let mut degrees: Vec<usize> = Vec::with_capacity(records.len());
    let mut nedges = 0usize;
    for record in &records {
        group_counts[record.group as usize] += 1;
        degrees.push(record.degree());
        nedges += record.degree();
    }
    degrees.sort_unstable();

    println!(
        "{}",
        json!({
            "nvertices": records.len(),
            "nedges": nedges / 2,
            "group_counts": group_counts,
            "min_degree": degrees.first().copied().unwrap_or(0),
            "median_degree": degrees.get(degrees.len() / 2).copied().unwrap_or(0),
            "max_degree": degrees.last().copied().unwrap_or(0),
            "gen_duration": format!("{:.0?}", Instant::now().duration_since(gen_start)),
        })
    );

    let write_start = Instant::now();
    let mut adj_name = opt.out.file_name().expect("file name").to_owned();
    adj_name.push(".adj.txt");
    let mut group_name = opt.out.file_name().expect("file name").to_owned();
    group_name.push(".group.txt");
    let adj_path = opt.out.with_file_name(adj_name);
    let group_path = opt.out.with_file_name(group_name);
    graphio::write(&records, &adj_path, &group_path)?;

    println!(
        "{}",
        json!({
            "adjacency": adj_path,
            "groups": group_path,
            "write_duration": format!("{:.0?}", Instant::now().duration_since(write_start)),
        })
    );

    Ok(())
}
