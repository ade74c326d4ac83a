use caie_downloader::services::SubjectMap;
use caie_downloader::{
    App, Config, DownloadRequest, FetchProbe, Level, SubjectEntry, SubjectResolver,
};
use std::path::Path;
use std::time::Duration;

/// 构造不可达主机的离线配置，所有路径都落在临时目录内
fn offline_config(dir: &Path) -> Config {
    Config {
        host_base_url: "http://127.0.0.1:1".to_string(),
        igcse_listing_url: "http://127.0.0.1:1/igcse".to_string(),
        alevel_listing_url: "http://127.0.0.1:1/alevel".to_string(),
        subject_cache_file: dir.join("subject_slugs.json"),
        working_dir: dir.join("work"),
        output_dir: dir.to_path_buf(),
        request_timeout_secs: 2,
        max_concurrent_downloads: 4,
        output_log_file: dir.join("download_log.txt").to_string_lossy().to_string(),
    }
}

fn seeded_resolver() -> SubjectResolver {
    let mut map = SubjectMap::new();
    map.insert(
        "0625".to_string(),
        SubjectEntry {
            slug: "physics-0625".to_string(),
            level: Level::Igcse,
        },
    );
    SubjectResolver::with_map(map)
}

fn offline_probe(config: &Config) -> FetchProbe {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("无法创建 HTTP 客户端");
    FetchProbe::new(config, client)
}

#[tokio::test]
async fn test_unresolved_subject_attempts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(dir.path());

    let request = DownloadRequest {
        subject_codes: "9999".to_string(),
        ..Default::default()
    };

    let probe = offline_probe(&config);
    let app = App::with_services(config, request, seeded_resolver(), probe)
        .await
        .expect("初始化应用失败");

    let summary = app.run().await.expect("运行失败");

    // 未解析的科目不应产生任何元组尝试，也不应让运行失败
    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.downloaded, 0);
    assert_eq!(summary.skipped_subjects, 1);
    assert!(summary.output.is_none());
}

#[tokio::test]
async fn test_all_miss_sweep_reports_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(dir.path());
    let working_dir = config.working_dir.clone();

    // 单个年份、仅 2/3 月考试季：恰好 1 个元组
    let request = DownloadRequest {
        subject_codes: "0625".to_string(),
        paper_code: "2".to_string(),
        start_year: "25".to_string(),
        end_year: "25".to_string(),
        doc_type: "Question Papers".to_string(),
        feb_march: true,
        may_june: false,
        oct_nov: false,
        ..Default::default()
    };

    let probe = offline_probe(&config);
    let app = App::with_services(config, request, seeded_resolver(), probe)
        .await
        .expect("初始化应用失败");

    let summary = app.run().await.expect("运行失败");

    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.downloaded, 0);
    assert!(summary.output.is_none());

    // 全部未命中后工作目录不应留下任何文件
    assert_eq!(std::fs::read_dir(&working_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_working_dir_cleared_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(dir.path());
    let working_dir = config.working_dir.clone();

    // 模拟上次运行的残留文件
    std::fs::create_dir_all(&working_dir).unwrap();
    std::fs::write(working_dir.join("0625_s22_qp_21.pdf"), b"stale").unwrap();
    std::fs::create_dir(working_dir.join("stray")).unwrap();

    let probe = offline_probe(&config);
    let _app = App::with_services(
        config,
        DownloadRequest::default(),
        seeded_resolver(),
        probe,
    )
    .await
    .expect("初始化应用失败");

    assert_eq!(std::fs::read_dir(&working_dir).unwrap().count(), 0);
}

#[tokio::test]
#[ignore] // 需要真实网络，手动运行：cargo test -- --ignored
async fn test_resolve_real_subject_listing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.subject_cache_file = dir.path().join("subject_slugs.json");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(12))
        .build()
        .expect("无法创建 HTTP 客户端");

    let resolver = SubjectResolver::new(&config, client);
    let entry = resolver.resolve("0625").await.expect("应该能解析 0625");

    assert_eq!(entry.level, Level::Igcse);
    assert!(entry.slug.ends_with("0625"));
}

#[tokio::test]
#[ignore]
async fn test_download_single_real_paper() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.subject_cache_file = dir.path().join("subject_slugs.json");
    config.working_dir = dir.path().join("work");
    config.output_dir = dir.path().to_path_buf();
    config.output_log_file = dir
        .path()
        .join("download_log.txt")
        .to_string_lossy()
        .to_string();

    let request = DownloadRequest {
        subject_codes: "0625".to_string(),
        paper_code: "2".to_string(),
        start_year: "23".to_string(),
        end_year: "23".to_string(),
        doc_type: "Question Papers".to_string(),
        feb_march: false,
        may_june: true,
        oct_nov: false,
        ..Default::default()
    };

    let summary = App::initialize(config, request)
        .await
        .expect("初始化应用失败")
        .run()
        .await
        .expect("运行失败");

    assert!(summary.downloaded > 0, "应该至少下载到一份试卷");
    let output = summary.output.expect("应该产出合并文件");
    assert!(output.exists());
}
