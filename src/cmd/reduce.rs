use std::path::PathBuf;

use clap::Parser;

use crate::engine::ReduceJob;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Name of the MapReduce job
    #[clap(short, long)]
    pub job: String,
    /// Which reduce partition to run
    #[clap(short, long)]
    pub reduce: usize,
    /// Number of map tasks that ran (one shard each)
    #[clap(short = 'm', long)]
    pub n_map: usize,
    /// Name of the reduce application
    #[clap(short, long)]
    pub workload: String,
    /// Directory holding the intermediate shards
    #[clap(short, long, default_value = ".")]
    pub dir: PathBuf,
    /// [OPT] Output file (default mrtmp.<job>-res-<reduce>, inside --dir)
    #[clap(short, long)]
    pub out: Option<PathBuf>,
}

impl Args {
    pub fn to_job(&self) -> ReduceJob {
        let job = ReduceJob::new(self.job.clone(), self.reduce, self.n_map).with_dir(&self.dir);
        match &self.out {
            Some(out) => job.with_out_file(out),
            None => job,
        }
    }
}
