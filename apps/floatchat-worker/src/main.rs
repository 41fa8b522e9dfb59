use clap::Parser;

use floatchat_worker::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	let args = Args::parse();

	floatchat_worker::run(args).await
}
