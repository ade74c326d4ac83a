use anyhow::Result;
use caie_downloader::{App, Config, DownloadRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    caie_downloader::logger::init();

    // 加载配置与表单参数
    let config = Config::load();
    let request = DownloadRequest::from_env();

    // 初始化并运行应用
    let summary = App::initialize(config, request).await?.run().await?;

    if summary.output.is_none() {
        // 整次运行没有产出任何文件，以非零退出码区分
        std::process::exit(1);
    }

    Ok(())
}
