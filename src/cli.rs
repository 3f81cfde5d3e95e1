use crate::regions::DEFAULT_REGION;
use clap::Parser;

#[derive(Parser)]
#[command(name = "ecs-console")]
#[command(about = "Interactive console for ECS clusters, service logs and forced redeploys")]
pub struct Cli {
    /// Region to bind at startup
    #[arg(short, long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// AWS profile name from ~/.aws/credentials
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Debug logging (written to /tmp/ecs-console.log)
    #[arg(short, long)]
    pub verbose: bool,
}
