//! Command-line application computing submodular cover coresets.

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use structopt::clap::arg_enum;
use structopt::StructOpt;

use geograph::{gen, graphio, MemoryStore, VertexStore};
use subcover::{coreset_of, CoverError, OptimMode};

arg_enum! {

#[derive(Debug)]
enum Optim {
    Classic,
    Lazy,
    LazyLazy,
    DisCover,
    TwoStage
}

}

/// Selects a coreset S of the input graph such that every vertex has at
/// least min(k, degree) of its neighbors in S and every group meets its
/// membership requirement.
///
/// The graph is either loaded from a plaintext adjacency/group file pair
/// (`index : { n1, n2, ... }` lines paired with `index : g` lines, as
/// produced by geograph's `generate` example), or sampled as a random
/// geometric graph when no files are given.
///
/// The group requirement is uniform: `--group-req` replicated over
/// `--ngroups` groups, matching the generator's label space. Worker fan-out
/// runs on rayon, so `RAYON_NUM_THREADS` caps the real parallelism
/// available to `--threads`.
#[derive(Debug, StructOpt)]
#[structopt(name = "subcover", about = "Compute a submodular cover coreset.")]
struct Opt {
    /// Adjacency list file; requires --groups.
    #[structopt(long)]
    adjacency: Option<PathBuf>,

    /// Group assignment file; requires --adjacency.
    #[structopt(long)]
    groups: Option<PathBuf>,

    /// Number of generated points when no input files are given.
    #[structopt(long, default_value = "1000")]
    gen_points: usize,

    /// Dimensions of the unit hypercube for generated graphs.
    #[structopt(long, default_value = "3")]
    gen_dims: usize,

    /// Adjacency distance threshold for generated graphs.
    #[structopt(long, default_value = "0.2")]
    gen_radius: f64,

    /// Random seed for generated graphs.
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// k-coverage requirement.
    #[structopt(long, short = "k", default_value = "20")]
    coverage: u32,

    /// Group count requirement, applied to every group.
    #[structopt(long, default_value = "100")]
    group_req: u32,

    /// Number of distinct groups.
    #[structopt(long, default_value = "5")]
    ngroups: usize,

    /// Optimization mode.
    #[structopt(long, possible_values = &Optim::variants(), case_insensitive = true, default_value = "Lazy")]
    optim: Optim,

    /// Number of worker tasks.
    #[structopt(long, short = "t", default_value = "1")]
    threads: usize,

    /// Assert that every vertex degree is at least the coverage
    /// requirement, skipping the per-vertex degree cap.
    #[structopt(long)]
    dense: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let load_start = Instant::now();
    let store = match (&opt.adjacency, &opt.groups) {
        (Some(adj), Some(groups)) => graphio::read(adj, groups)?,
        (None, None) => MemoryStore::new(gen::generate(
            opt.gen_points,
            opt.gen_dims,
            opt.ngroups as u32,
            opt.gen_radius,
            opt.seed,
        )),
        _ => return Err("--adjacency and --groups must be given together".into()),
    };
    println!(
        "store of {} vertices ready {:.0?}",
        store.size(),
        Instant::now().duration_since(load_start)
    );

    let group_reqs = vec![opt.group_req; opt.ngroups];
    let mode = match opt.optim {
        Optim::Classic => OptimMode::Classic,
        Optim::Lazy => OptimMode::Lazy,
        Optim::LazyLazy => OptimMode::LazyLazy,
        Optim::DisCover => OptimMode::DisCover,
        Optim::TwoStage => OptimMode::TwoStage,
    };

    let solve_start = Instant::now();
    let result = coreset_of(
        &store,
        opt.coverage,
        &group_reqs,
        mode,
        opt.threads,
        opt.dense,
    );
    let elapsed = Instant::now().duration_since(solve_start);

    match result {
        Ok(coreset) => {
            println!("obtained solution of size {} in {:.0?}", coreset.len(), elapsed);
            Ok(())
        }
        Err(CoverError::Unsatisfiable {
            coreset,
            groups,
            residual,
            ..
        }) => {
            println!(
                "cover unsatisfiable in {:.0?}: selected {} vertices, residual {} (groups {:?})",
                elapsed,
                coreset.len(),
                residual,
                groups
            );
            Err("unsatisfiable remainder".into())
        }
        Err(e) => Err(e.into()),
    }
}
