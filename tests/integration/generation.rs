use anyhow::Result;
use specrunner_cli::runner::{
    Dependency, DependencyKind, ReporterKind, RunnerConfig, SpecRunnerGenerator, to_locator,
};
use specrunner_cli::test_utils::TestEnvironment;

fn script_srcs(html: &str) -> Vec<String> {
    html.split("<script type=\"text/javascript\" src=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

fn basic_generator(env: &TestEnvironment) -> Result<SpecRunnerGenerator> {
    let config = RunnerConfig::builder()
        .source_dir(&env.source_dir)
        .spec_dir(&env.spec_dir)
        .build()?;
    Ok(SpecRunnerGenerator::new(config))
}

#[test]
fn test_sources_then_specs_in_sorted_order() -> Result<()> {
    let env = TestEnvironment::new()?;
    for name in ["b.js", "a.js", "c.js"] {
        env.create_file(format!("src/main/javascript/{name}"), "//")?;
    }
    env.create_file("src/test/javascript/aSpec.js", "//")?;

    let html = basic_generator(&env)?.generate(&[], ReporterKind::Trivial)?;

    let expected: Vec<String> = [
        env.source_dir.join("a.js"),
        env.source_dir.join("b.js"),
        env.source_dir.join("c.js"),
        env.spec_dir.join("aSpec.js"),
    ]
    .iter()
    .map(|p| to_locator(p))
    .collect::<Result<_, _>>()?;
    assert_eq!(script_srcs(&html), expected);
    Ok(())
}

#[test]
fn test_nested_files_and_hidden_vcs_dirs() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.create_file("src/main/javascript/models/user.js", "//")?;
    env.create_file("src/main/javascript/.git/hooks/hook.js", "//")?;
    env.create_file("src/main/javascript/README.md", "docs")?;

    let html = basic_generator(&env)?.generate(&[], ReporterKind::Trivial)?;

    let srcs = script_srcs(&html);
    assert_eq!(srcs.len(), 1);
    assert!(srcs[0].ends_with("/models/user.js"));
    Ok(())
}

#[test]
fn test_load_first_with_cdn_and_local() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;
    env.create_file("src/main/javascript/vendor/jquery.js", "//")?;
    let config = RunnerConfig::builder()
        .source_dir(&env.source_dir)
        .spec_dir(&env.spec_dir)
        .load_first(["https://cdn.example.com/underscore.js", "vendor/jquery.js", "helpers/SpecHelper.js"])
        .build()?;

    let html = SpecRunnerGenerator::new(config).generate(&[], ReporterKind::JsApi)?;

    let srcs = script_srcs(&html);
    assert_eq!(srcs[0], "https://cdn.example.com/underscore.js");
    assert_eq!(srcs[1], to_locator(&env.source_dir.join("vendor/jquery.js"))?);
    assert_eq!(srcs[2], to_locator(&env.spec_dir.join("helpers/SpecHelper.js"))?);

    let mut unique = srcs.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), srcs.len(), "no locator may repeat");
    Ok(())
}

#[test]
fn test_dependencies_from_files_are_inlined() -> Result<()> {
    let env = TestEnvironment::new()?;
    let jasmine = env.create_file("lib/jasmine.js", "var jasmine = {};")?;
    let css = env.create_file("lib/jasmine.css", "body { font-size: 10px }")?;
    let deps = vec![
        Dependency::from_file(DependencyKind::Script, &jasmine),
        Dependency::from_file(DependencyKind::Stylesheet, &css),
        Dependency::from_file(DependencyKind::from_type("jar"), env.project_path().join("missing.jar")),
    ];

    let html = basic_generator(&env)?.generate(&deps, ReporterKind::Trivial)?;

    assert!(html.contains("<script type=\"text/javascript\">var jasmine = {};</script>"));
    assert!(html.contains("<style type=\"text/css\">body { font-size: 10px }</style>"));
    Ok(())
}

#[test]
fn test_missing_directories_are_created() -> Result<()> {
    let env = TestEnvironment::new()?;
    let source = env.project_path().join("not/yet/there");
    let config = RunnerConfig::builder().source_dir(&source).build()?;

    let html = SpecRunnerGenerator::new(config).generate(&[], ReporterKind::Trivial)?;

    assert!(source.is_dir());
    assert!(script_srcs(&html).is_empty());
    Ok(())
}

#[test]
fn test_custom_template_from_disk() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;
    let template = env.create_file(
        "runner.html",
        "<html><head><meta charset=\"{{ sourceEncoding }}\">{{ sources }}</head>\
         <body data-reporter=\"{{ reporter }}\"></body></html>",
    )?;
    let config = RunnerConfig::builder()
        .source_dir(&env.source_dir)
        .source_encoding("ISO-8859-1")
        .custom_template(&template)
        .build()?;

    let html = SpecRunnerGenerator::new(config).generate(&[], ReporterKind::JsApi)?;

    assert!(html.starts_with("<html><head><meta charset=\"ISO-8859-1\">"));
    assert!(html.contains("data-reporter=\"JsApiReporter\""));
    assert!(!html.contains("Jasmine Spec Runner"));
    assert_eq!(script_srcs(&html).len(), 2);
    Ok(())
}

#[test]
fn test_nested_scripts_sort_by_whole_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    for name in ["lib/util.js", "lib.js", "a/b.js", "a-b.js"] {
        env.create_file(format!("src/main/javascript/{name}"), "//")?;
    }

    let html = basic_generator(&env)?.generate(&[], ReporterKind::Trivial)?;

    let expected: Vec<String> = ["a-b.js", "a/b.js", "lib.js", "lib/util.js"]
        .iter()
        .map(|name| to_locator(&env.source_dir.join(name)))
        .collect::<Result<_, _>>()?;
    assert_eq!(script_srcs(&html), expected);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_scripts_are_emitted() -> Result<()> {
    use std::os::unix::fs::symlink;

    let env = TestEnvironment::new()?;
    let shared = env.project_path().join("shared");
    env.create_file("shared/util.js", "//")?;
    env.create_file("src/main/javascript/app.js", "//")?;
    symlink(shared.join("util.js"), env.source_dir.join("linked.js"))?;
    symlink(&shared, env.source_dir.join("vendor"))?;

    let html = basic_generator(&env)?.generate(&[], ReporterKind::Trivial)?;

    let expected: Vec<String> = ["app.js", "linked.js", "vendor/util.js"]
        .iter()
        .map(|name| to_locator(&env.source_dir.join(name)))
        .collect::<Result<_, _>>()?;
    assert_eq!(script_srcs(&html), expected);
    Ok(())
}

#[test]
fn test_latin1_dependency_and_template_from_disk() -> Result<()> {
    let env = TestEnvironment::new()?;
    let dependency = env.project_path().join("lib/messages.js");
    let template = env.project_path().join("runner.html");
    std::fs::create_dir_all(env.project_path().join("lib"))?;
    std::fs::write(&dependency, b"var msg = 'd\xe9j\xe0 vu';")?;
    std::fs::write(&template, b"<title>R\xe9sultats</title>{{ javascriptDependencies }}")?;
    let config = RunnerConfig::builder()
        .source_encoding("ISO-8859-1")
        .custom_template(&template)
        .build()?;

    let deps = [Dependency::from_file(DependencyKind::Script, &dependency)];
    let html = SpecRunnerGenerator::new(config).generate(&deps, ReporterKind::Trivial)?;

    assert_eq!(
        html,
        "<title>Résultats</title><script type=\"text/javascript\">var msg = 'déjà vu';</script>"
    );
    Ok(())
}
