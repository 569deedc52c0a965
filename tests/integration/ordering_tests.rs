use std::fs;

use xml_archive_report::file_discovery::FileDiscovery;
use xml_archive_report::pipeline::ParsePipeline;

use crate::common::test_helpers::*;

#[tokio::test]
async fn test_reports_identical_for_any_pool_size() {
    let archives = 8;
    let dir = folder_with_archives(archives, 4);
    let mut reports = Vec::new();

    for workers in [1, 2, archives] {
        ParsePipeline::new(workers).run(dir.path()).await.unwrap();
        let vars = fs::read(dir.path().join("vars.csv")).unwrap();
        let objects = fs::read(dir.path().join("objects.csv")).unwrap();
        reports.push((vars, objects));
    }

    assert_eq!(reports[0], reports[1]);
    assert_eq!(reports[0], reports[2]);
}

#[tokio::test]
async fn test_rows_follow_archive_then_document_order() {
    let dir = folder_with_archives(3, 2);

    ParsePipeline::new(3).run(dir.path()).await.unwrap();

    let (vars, objects) = read_reports(dir.path()).unwrap();
    assert_eq!(
        vars,
        "id,level\r\na0d0,1\r\na0d1,2\r\na1d0,1\r\na1d1,2\r\na2d0,1\r\na2d1,2\r\n"
    );
    let object_rows: Vec<&str> = objects.split("\r\n").skip(1).take(4).collect();
    assert_eq!(
        object_rows,
        vec![
            "a0d0,a0d0-first",
            "a0d0,a0d0-second",
            "a0d1,a0d1-first",
            "a0d1,a0d1-second",
        ]
    );
}

#[tokio::test]
async fn test_discovery_order_is_by_file_name() {
    let dir = tempfile::TempDir::new().unwrap();
    for name in ["b.zip", "a.zip", "c.ZIP", "skip.txt", "10.zip", "9.zip"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("d.zip")).unwrap();

    let files = FileDiscovery::new().discover_files(dir.path()).await.unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["10.zip", "9.zip", "a.zip", "b.zip", "c.ZIP"]);
}

#[tokio::test]
async fn test_many_archives_small_pool() {
    let dir = folder_with_archives(20, 1);

    let summary = ParsePipeline::new(2).run(dir.path()).await.unwrap();

    assert_eq!(summary.workers, 2);
    assert_eq!(summary.documents, 20);
    let ids: Vec<String> = read_reports(dir.path())
        .unwrap()
        .0
        .split("\r\n")
        .skip(1)
        .filter(|row| !row.is_empty())
        .map(|row| row.split_once(',').unwrap().0.to_string())
        .collect();
    let expected: Vec<String> = (0..20).map(|a| format!("a{}d0", a)).collect();
    assert_eq!(ids, expected);
}
