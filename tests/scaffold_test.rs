use drillbook_lib::error::ErrorStage;
use drillbook_lib::problems::problem::Problem;
use drillbook_lib::scaffold::{solution_stub, Scaffolder};
use std::fs;

fn problem(id: &str, category: &str, topic: &str) -> Problem {
    Problem {
        id: id.to_string(),
        title: "Neighborhood enrichment".to_string(),
        category: category.to_string(),
        topic: topic.to_string(),
        difficulty: 2,
        tags: ["neighbors", "squidpy"].iter().map(|t| t.to_string()).collect(),
        description: "\n  Build a spatial graph and run nhood_enrichment.\n\n".to_string(),
        est_time_min: Some(30),
    }
}

#[test]
fn test_stub_header_and_template() {
    let stub = solution_stub(&problem("sp_001", "spatial", "squidpy"));
    assert!(stub.starts_with("\"\"\"\nsp_001: Neighborhood enrichment\n\nCategory: spatial\nTopic: squidpy\nTags: neighbors, squidpy\n\nTask:\nBuild a spatial graph and run nhood_enrichment.\n\"\"\"\n\n"));
    assert!(stub.contains("import scanpy as sc\nimport squidpy as sq\n"));
    assert!(stub.contains("def main():\n    # TODO: implement your solution\n    pass\n"));
    assert!(stub.ends_with("if __name__ == '__main__':\n    main()\n"));
}

#[test]
fn test_stub_imports_follow_category_and_topic() {
    assert!(solution_stub(&problem("a", "pandas", "io")).contains("import pandas as pd"));
    assert!(solution_stub(&problem("b", "misc", "pandas")).contains("import pandas as pd"));

    let sc = solution_stub(&problem("c", "single_cell", "qc"));
    assert!(sc.contains("import scanpy as sc"));
    assert!(!sc.contains("import squidpy"));

    assert!(solution_stub(&problem("d", "misc", "regex")).contains("# import needed modules"));
}

#[test]
fn test_ensure_creates_once_and_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path().join("solutions"));
    let p = problem("sp_001", "spatial", "squidpy");

    let path = scaffolder.ensure(&p).unwrap();
    assert_eq!(path, dir.path().join("solutions").join("sp_001.py"));
    assert_eq!(fs::read_to_string(&path).unwrap(), solution_stub(&p));

    fs::write(&path, "my work in progress").unwrap();
    let again = scaffolder.ensure(&p).unwrap();
    assert_eq!(again, path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "my work in progress");
}

#[test]
fn test_save_overwrites_explicitly() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path());
    let p = problem("pd_001", "pandas", "pandas");

    let path = scaffolder.ensure(&p).unwrap();
    scaffolder.save("pd_001", "import pandas as pd\nprint('done')\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "import pandas as pd\nprint('done')\n");
}

#[test]
fn test_ids_that_leave_the_directory_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path().join("solutions"));

    for id in ["../escaped", "nested/sp_001", "win\\sp_001", ""] {
        let err = scaffolder.ensure(&problem(id, "spatial", "squidpy")).unwrap_err();
        assert_eq!(err.stage, ErrorStage::Scaffold, "ensure accepted {:?}", id);
        let err = scaffolder.save(id, "print('x')\n").unwrap_err();
        assert_eq!(err.stage, ErrorStage::Scaffold, "save accepted {:?}", id);
    }
    assert!(!dir.path().join("escaped.py").exists());
    assert!(!dir.path().join("solutions").exists());
}
