use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};

use essay_generator::config::Config;
use essay_generator::error::{ApiError, AppError, EssayError, FileError, GENERIC_FAILURE_MESSAGE};
use essay_generator::models::{CancelFlag, EventSink, GenerationJob, Language, PipelineEvent};
use essay_generator::orchestrator::{
    EssayGenerator, RunOutcome, CANCELLED_MESSAGE, CANCELLED_STATUS, SUCCESS_MESSAGE,
};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const OUTLINE_KEY: &str = "Составь план реферата";
const INTRO_KEY: &str = "Напиши введение";
const CHAPTER_KEY: &str = "Напиши текст главы";

const OUTLINE: &str = "Введение\nГлава 1. Истоки\nГлава 2. Расцвет\nГлава 3. Упадок";

fn test_config(base_url: &str) -> Config {
    Config {
        llm_api_key: "test-key".to_string(),
        llm_api_base_url: base_url.to_string(),
        llm_model_name: "test-model".to_string(),
        max_retries: 2,
        retry_base_delay_ms: 1,
        ..Config::default()
    }
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "created": 0,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

fn job(topics: &[&str], output_dir: &Path) -> GenerationJob {
    GenerationJob::new(topics.iter().copied(), 3, 1000, output_dir, Language::Russian).unwrap()
}

async fn mount_outline(server: &MockServer, topic: &str, outline: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(OUTLINE_KEY))
        .and(body_string_contains(topic))
        .respond_with(completion(outline))
        .mount(server)
        .await;
}

async fn mount_sections(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(INTRO_KEY))
        .respond_with(completion(
            "Введение\n\n## Актуальность\nТема **крайне** важна для `науки`.",
        ))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(CHAPTER_KEY))
        .respond_with(completion("- первый пункт\n- второй пункт\nТекст главы."))
        .mount(server)
        .await;
}

/// 同步运行并收集全部事件
async fn run_collecting(
    generator: &EssayGenerator,
    job: &GenerationJob,
    cancel: &CancelFlag,
) -> (RunOutcome, Vec<PipelineEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let outcome = generator.run(job, &EventSink::new(tx), cancel).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    (outcome, events)
}

fn progress_values(events: &[PipelineEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Progress { percent } => Some(*percent),
            _ => None,
        })
        .collect()
}

fn finished_events(events: &[PipelineEvent]) -> Vec<(bool, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::Finished { success, message } => Some((*success, message.clone())),
            _ => None,
        })
        .collect()
}

fn last_status(events: &[PipelineEvent]) -> Option<String> {
    events.iter().rev().find_map(|e| match e {
        PipelineEvent::Status { message } => Some(message.clone()),
        _ => None,
    })
}

fn read_document_xml(path: &Path) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[tokio::test]
async fn test_full_run_writes_every_essay() {
    let server = MockServer::start().await;
    mount_outline(&server, "Римская империя", OUTLINE).await;
    mount_outline(&server, "Квантовая физика", OUTLINE).await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = job(&["Римская империя", "Квантовая физика?!"], dir.path());
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let (outcome, events) = run_collecting(&generator, &job, &CancelFlag::new()).await;

    assert!(outcome.is_success(), "outcome: {:?}", outcome);

    // 2 个主题 × (3 章 + 引言) = 8 步
    let progress = progress_values(&events);
    assert_eq!(progress.len(), 8);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));

    let completed: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::EssayCompleted { topic } => Some(topic.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec!["Римская империя", "Квантовая физика?!"]);

    assert_eq!(
        finished_events(&events),
        vec![(true, SUCCESS_MESSAGE.to_string())]
    );

    assert!(events.contains(&PipelineEvent::Status {
        message: "Генерация структуры реферата: Римская империя".to_string()
    }));
    assert!(events.contains(&PipelineEvent::Status {
        message: "Генерация раздела: Глава 2. Расцвет".to_string()
    }));

    let first = dir.path().join("Реферат - Римская империя.docx");
    let second = dir.path().join("Реферат - Квантовая физика.docx");
    assert!(first.exists());
    assert!(second.exists());

    let xml = read_document_xml(&first);
    assert!(xml.contains("Тема крайне важна для науки."));
    assert!(xml.contains("Актуальность"));
    assert!(xml.contains("первый пункт"));
    assert!(!xml.contains("**"));
    assert!(!xml.contains("## "));
    // 正文开头重复的"Введение"被去掉，只剩标题段落
    assert_eq!(xml.matches(">Введение<").count(), 1);
}

#[tokio::test]
async fn test_background_run_stops_after_cancel() {
    // 在返回第二个主题的大纲时置位取消标志
    struct CancelOnOutline {
        flag: Arc<Mutex<Option<CancelFlag>>>,
    }

    impl Respond for CancelOnOutline {
        fn respond(&self, _request: &Request) -> ResponseTemplate {
            if let Some(flag) = self.flag.lock().unwrap().as_ref() {
                flag.cancel();
            }
            completion(OUTLINE)
        }
    }

    let server = MockServer::start().await;
    let shared = Arc::new(Mutex::new(None));

    mount_outline(&server, "Первая тема", OUTLINE).await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(OUTLINE_KEY))
        .and(body_string_contains("Вторая тема"))
        .respond_with(CancelOnOutline {
            flag: shared.clone(),
        })
        .mount(&server)
        .await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = job(&["Первая тема", "Вторая тема"], dir.path());
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let mut handle = generator.start(job);
    *shared.lock().unwrap() = Some(handle.cancel_flag());

    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        events.push(event);
    }
    let outcome = handle.join().await;

    assert!(matches!(outcome, RunOutcome::Cancelled), "outcome: {:?}", outcome);
    assert_eq!(
        finished_events(&events),
        vec![(false, CANCELLED_MESSAGE.to_string())]
    );
    assert_eq!(last_status(&events).as_deref(), Some(CANCELLED_STATUS));
    assert_eq!(progress_values(&events).last(), Some(&50));

    assert!(dir.path().join("Реферат - Первая тема.docx").exists());
    assert!(!dir.path().join("Реферат - Вторая тема.docx").exists());
}

#[tokio::test]
async fn test_cancel_before_start_sends_no_requests() {
    let server = MockServer::start().await;
    mount_outline(&server, "Тема", OUTLINE).await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = job(&["Тема"], dir.path());
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let cancel = CancelFlag::new();
    cancel.cancel();
    let (outcome, events) = run_collecting(&generator, &job, &cancel).await;

    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert_eq!(
        finished_events(&events),
        vec![(false, CANCELLED_MESSAGE.to_string())]
    );
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_outline_without_chapters_is_invalid() {
    let server = MockServer::start().await;
    mount_outline(&server, "Тема", "Введение").await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = GenerationJob::new(["Тема"], 5, 2000, dir.path(), Language::Russian).unwrap();
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let (outcome, events) = run_collecting(&generator, &job, &CancelFlag::new()).await;

    let expected = EssayError::InvalidStructure {
        topic: "Тема".to_string(),
    }
    .user_message();

    match outcome {
        RunOutcome::Failed(AppError::Essay(EssayError::InvalidStructure { topic })) => {
            assert_eq!(topic, "Тема")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(finished_events(&events), vec![(false, expected.clone())]);
    assert_eq!(last_status(&events), Some(expected));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_rate_limit_is_retried_transparently() {
    let server = MockServer::start().await;
    mount_outline(&server, "Тема", OUTLINE).await;

    // 前两次章节请求返回 429
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(CHAPTER_KEY))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = job(&["Тема"], dir.path());
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let (outcome, events) = run_collecting(&generator, &job, &CancelFlag::new()).await;

    assert!(outcome.is_success(), "outcome: {:?}", outcome);
    assert_eq!(
        finished_events(&events),
        vec![(true, SUCCESS_MESSAGE.to_string())]
    );
    // 大纲 1 + 引言 1 + 章节 3 + 两次 429
    assert_eq!(server.received_requests().await.unwrap().len(), 7);
    let xml = read_document_xml(&dir.path().join("Реферат - Тема.docx"));
    assert_eq!(xml.matches("Текст главы.").count(), 3);
}

#[tokio::test]
async fn test_api_error_aborts_run_and_keeps_earlier_files() {
    let server = MockServer::start().await;
    mount_outline(&server, "Удачная тема", OUTLINE).await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(OUTLINE_KEY))
        .and(body_string_contains("Сломанная тема"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_sections(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let job = job(&["Удачная тема", "Сломанная тема", "Лишняя тема"], dir.path());
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let (outcome, events) = run_collecting(&generator, &job, &CancelFlag::new()).await;

    let expected = ApiError::ServiceError { code: 401 }.user_message().to_string();

    assert!(matches!(
        outcome,
        RunOutcome::Failed(AppError::Api(ApiError::ServiceError { code: 401 }))
    ));
    assert_eq!(outcome.user_message(), expected);
    assert_eq!(finished_events(&events), vec![(false, expected.clone())]);
    assert_eq!(last_status(&events), Some(expected));

    assert!(dir.path().join("Реферат - Удачная тема.docx").exists());
    assert!(!dir.path().join("Реферат - Сломанная тема.docx").exists());
    assert!(!dir.path().join("Реферат - Лишняя тема.docx").exists());
}

#[tokio::test]
async fn test_unwritable_output_dir_reports_generic_failure() {
    let server = MockServer::start().await;
    mount_outline(&server, "Тема", OUTLINE).await;
    mount_sections(&server).await;

    // 输出目录实际上是一个普通文件
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let job = job(&["Тема"], &blocker);
    let generator = EssayGenerator::new(&test_config(&server.uri())).unwrap();

    let (outcome, events) = run_collecting(&generator, &job, &CancelFlag::new()).await;

    assert!(
        matches!(outcome, RunOutcome::Failed(AppError::File(FileError::WriteFailed { .. }))),
        "outcome: {:?}",
        outcome
    );
    assert_eq!(
        finished_events(&events),
        vec![(false, GENERIC_FAILURE_MESSAGE.to_string())]
    );
    assert_eq!(last_status(&events).as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    // 所有部分都已生成，失败发生在写文件时
    assert_eq!(progress_values(&events).last(), Some(&100));
    assert_eq!(std::fs::read(&blocker).unwrap(), b"x");
}
