use dedalus_runner::{app, error::Result, Config, DedalusClient, DedalusRunner};
use log::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    // 缺少密钥时在这里退出，不会发起请求
    let config = Config::from_env()?;
    debug!("loaded config: {:?}", config);

    let runner = DedalusRunner::new(DedalusClient::new(config)?);
    app::run(&runner, &mut std::io::stdout().lock()).await?;

    Ok(())
}
