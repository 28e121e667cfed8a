use anyhow::{Context, Result};
use bilingual_trivia::utils::logging;
use bilingual_trivia::{App, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::try_from_env().context("读取配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let command = Command::parse(std::env::args().skip(1)).context("解析命令失败")?;

    // 初始化并运行应用
    let app = App::initialize(config).await.context("初始化应用失败")?;
    app.run(command).await?;

    Ok(())
}
