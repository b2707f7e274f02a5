//! End-to-end builder tests against a mock GitHub.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use skills_build::{Builder, BuilderConfig, ListingError};
use skills_core::{Catalog, Category, ALTERNATE_SOURCE, PRIMARY_SOURCES};
use tempfile::TempDir;

const HF_LISTING: &str = "/repos/huggingface/skills/contents/skills";
const SP_LISTING: &str = "/repos/obra/superpowers/contents/skills";
const ALT_LISTING: &str = "/repos/muratcankoylan/Agent-Skills-for-Context-Engineering/contents";

fn config(server: &ServerGuard, token: Option<&str>) -> BuilderConfig {
    BuilderConfig {
        api_base: server.url(),
        raw_base: format!("{}/raw", server.url()),
        token: token.map(String::from),
        ..BuilderConfig::default()
    }
}

fn dir(name: &str) -> serde_json::Value {
    json!({ "name": name, "type": "dir", "url": format!("https://api.github.com/x/{name}"), "download_url": null })
}

async fn listing(server: &mut ServerGuard, path: &str, body: serde_json::Value) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn raw(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", format!("/raw{path}").as_str())
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn build_collects_all_sources() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let hf = listing(
        &mut server,
        HF_LISTING,
        json!([
            dir("hf-cli"),
            { "name": "README.md", "type": "file", "url": "", "download_url": "https://example.com/README.md" },
            dir("datasets"),
        ]),
    )
    .await;
    let hf_cli = raw(
        &mut server,
        "/huggingface/skills/main/skills/hf-cli/SKILL.md",
        200,
        "---\nname: hugging-face-cli\ndescription: Upload and download files with the hf CLI\n---\n\n# HF CLI\n\nUse it.\n",
    )
    .await;
    let datasets = raw(
        &mut server,
        "/huggingface/skills/main/skills/datasets/SKILL.md",
        404,
        "Not Found",
    )
    .await;

    let sp = listing(&mut server, SP_LISTING, json!([dir("brainstorming")])).await;
    let brainstorming = raw(
        &mut server,
        "/obra/superpowers/main/skills/brainstorming/SKILL.md",
        200,
        "---\ndescription: Refine rough ideas into designs\n---\n\n# Brainstorming\n",
    )
    .await;

    let alt = listing(
        &mut server,
        ALT_LISTING,
        json!([
            { "name": "context-fundamentals", "type": "dir", "url": format!("{base}/alt/context-fundamentals"), "download_url": null },
            { "name": ".github", "type": "dir", "url": format!("{base}/alt/.github"), "download_url": null },
            { "name": "README.md", "type": "file", "url": format!("{base}/alt/README.md"), "download_url": format!("{base}/dl/README.md") },
        ]),
    )
    .await;
    let alt_dir = listing(
        &mut server,
        "/alt/context-fundamentals",
        json!([
            { "name": "SKILL.md", "type": "file", "url": "", "download_url": format!("{base}/dl/context-fundamentals/SKILL.md") },
            { "name": "README.md", "type": "file", "url": "", "download_url": format!("{base}/dl/context-fundamentals/README.md") },
        ]),
    )
    .await;
    let hidden_dir = server
        .mock("GET", "/alt/.github")
        .expect(0)
        .create_async()
        .await;
    let readme = server
        .mock("GET", "/dl/context-fundamentals/README.md")
        .with_status(200)
        .with_body("# Context Fundamentals\n\nUnderstand how context windows shape agent behavior.\n\nMore.")
        .create_async()
        .await;

    let builder = Builder::new(&config(&server, None));
    let result = builder.build_catalog().await;

    for mock in [&hf, &hf_cli, &datasets, &sp, &brainstorming, &alt, &alt_dir, &hidden_dir, &readme] {
        mock.assert_async().await;
    }

    assert!(result.errors.is_empty());
    let catalog = result.catalog;
    assert_eq!(catalog.total_skills, 3);
    assert_eq!(catalog.sources.len(), 3);
    let names: Vec<_> = catalog.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["brainstorming", "Context Fundamentals", "hugging-face-cli"]
    );

    let cli = catalog.find("huggingface-skills-hf-cli").unwrap();
    assert_eq!(cli.slug, "hf-cli");
    assert_eq!(cli.category, Category::Tools);
    assert_eq!(cli.platform, "HuggingFace");
    assert_eq!(cli.body, "# HF CLI\n\nUse it.");
    assert_eq!(
        cli.source_url,
        "https://github.com/huggingface/skills/tree/main/skills/hf-cli"
    );
    assert_eq!(
        cli.skill_md_url,
        format!("{base}/raw/huggingface/skills/main/skills/hf-cli/SKILL.md")
    );

    let plan = catalog.find("obra-superpowers-brainstorming").unwrap();
    assert_eq!(plan.description, "Refine rough ideas into designs");
    assert_eq!(plan.category, Category::Planning);

    let ctx = catalog
        .find("muratcankoylan-Agent-Skills-for-Context-Engineering-context-fundamentals")
        .unwrap();
    assert_eq!(ctx.platform, ALTERNATE_SOURCE.platform);
    assert_eq!(
        ctx.description,
        "Understand how context windows shape agent behavior."
    );
    assert_eq!(ctx.category, Category::General);
    assert_eq!(
        ctx.skill_md_url,
        format!("{base}/dl/context-fundamentals/README.md")
    );
    assert_eq!(
        ctx.source_url,
        "https://github.com/muratcankoylan/Agent-Skills-for-Context-Engineering/tree/main/context-fundamentals"
    );

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("public/skills-data.json");
    catalog.write_to(&path).unwrap();
    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded.total_skills, loaded.skills.len());
    assert_eq!(loaded, catalog);
}

#[tokio::test]
async fn failed_listing_drops_only_that_source() {
    let mut server = mockito::Server::new_async().await;

    let hf = server
        .mock("GET", HF_LISTING)
        .with_status(500)
        .create_async()
        .await;
    listing(&mut server, SP_LISTING, json!([dir("tdd")])).await;
    raw(
        &mut server,
        "/obra/superpowers/main/skills/tdd/SKILL.md",
        200,
        "---\nname: test-driven-development\n---\nWrite the test first.",
    )
    .await;
    server
        .mock("GET", ALT_LISTING)
        .with_status(403)
        .create_async()
        .await;

    let result = Builder::new(&config(&server, None)).build_catalog().await;
    hf.assert_async().await;

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].repository, "huggingface/skills");
    assert!(matches!(
        result.errors[0].error,
        ListingError::Status { status: 500, .. }
    ));
    assert_eq!(result.catalog.total_skills, 1);
    // Categorized by directory name, not the header title.
    assert_eq!(result.catalog.skills[0].name, "test-driven-development");
    assert_eq!(result.catalog.skills[0].category, Category::General);
}

#[tokio::test]
async fn descriptor_errors_skip_single_skill() {
    let mut server = mockito::Server::new_async().await;
    let source = &PRIMARY_SOURCES[0];

    listing(&mut server, HF_LISTING, json!([dir("broken"), dir("missing"), dir("ok")])).await;
    raw(&mut server, "/huggingface/skills/main/skills/broken/SKILL.md", 500, "boom").await;
    raw(&mut server, "/huggingface/skills/main/skills/missing/SKILL.md", 404, "").await;
    raw(
        &mut server,
        "/huggingface/skills/main/skills/ok/SKILL.md",
        200,
        "no header here",
    )
    .await;

    let builder = Builder::new(&config(&server, None));

    let dirs = builder.list_skill_directories(source).await.unwrap();
    assert_eq!(dirs, vec!["broken", "missing", "ok"]);

    assert!(builder.fetch_skill_descriptor(source, "broken").await.is_err());
    assert!(builder
        .fetch_skill_descriptor(source, "missing")
        .await
        .unwrap()
        .is_none());

    let records = builder.fetch_primary_source(source).await.unwrap();
    assert_eq!(records.len(), 1);
    let ok = &records[0];
    assert_eq!(ok.name, "ok");
    assert_eq!(ok.description, "");
    assert_eq!(ok.body, "");
    assert_eq!(ok.category, Category::General);
}

#[tokio::test]
async fn token_is_sent_to_api_but_not_raw_host() {
    let mut server = mockito::Server::new_async().await;

    let api = server
        .mock("GET", HF_LISTING)
        .match_header("authorization", "token secret")
        .match_header("accept", "application/vnd.github+json")
        .match_header("user-agent", "agent-skills-browser")
        .with_status(200)
        .with_body(json!([dir("hf-cli")]).to_string())
        .create_async()
        .await;
    let raw_host = server
        .mock("GET", "/raw/huggingface/skills/main/skills/hf-cli/SKILL.md")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("---\nname: hf-cli\n---\n")
        .create_async()
        .await;

    let builder = Builder::new(&config(&server, Some("secret")));
    let records = builder
        .fetch_primary_source(&PRIMARY_SOURCES[0])
        .await
        .unwrap();

    api.assert_async().await;
    raw_host.assert_async().await;
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn no_credential_header_without_token() {
    let mut server = mockito::Server::new_async().await;

    let api = server
        .mock("GET", HF_LISTING)
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let builder = Builder::new(&config(&server, Some("")));
    let dirs = builder
        .list_skill_directories(&PRIMARY_SOURCES[0])
        .await
        .unwrap();

    api.assert_async().await;
    assert!(dirs.is_empty());
}

#[tokio::test]
async fn undecodable_listing_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    listing(&mut server, HF_LISTING, json!({ "message": "not a list" })).await;

    let builder = Builder::new(&config(&server, None));
    let err = builder
        .list_skill_directories(&PRIMARY_SOURCES[0])
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::Decode { .. }));
}

#[tokio::test]
async fn duplicate_ids_keep_first_record() {
    let mut server = mockito::Server::new_async().await;

    listing(&mut server, SP_LISTING, json!([dir("tdd"), dir("tdd")])).await;
    let descriptor = server
        .mock("GET", "/raw/obra/superpowers/main/skills/tdd/SKILL.md")
        .with_status(200)
        .with_body("---\nname: tdd\n---\n")
        .expect(2)
        .create_async()
        .await;

    let result = Builder::new(&config(&server, None)).build_catalog().await;
    descriptor.assert_async().await;

    assert_eq!(result.catalog.total_skills, 1);
    assert_eq!(result.catalog.skills[0].id, "obra-superpowers-tdd");
}

#[tokio::test]
async fn alternate_source_ranks_markdown_and_falls_back_to_dir_name() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    listing(
        &mut server,
        ALT_LISTING,
        json!([
            { "name": "memory-systems", "type": "dir", "url": format!("{base}/alt/memory-systems") },
        ]),
    )
    .await;
    listing(
        &mut server,
        "/alt/memory-systems",
        json!([
            { "name": "notes.md", "type": "file", "url": "", "download_url": format!("{base}/dl/notes.md") },
            { "name": "SKILL.md", "type": "file", "url": "", "download_url": format!("{base}/dl/SKILL.md") },
            { "name": "README.md", "type": "file", "url": "", "download_url": null },
        ]),
    )
    .await;
    let long_body = "y".repeat(3000);
    let skill_md = server
        .mock("GET", "/dl/SKILL.md")
        .with_status(200)
        .with_body(&long_body)
        .create_async()
        .await;

    let builder = Builder::new(&config(&server, None));
    let records = builder.fetch_alternate_source(&ALTERNATE_SOURCE).await;
    skill_md.assert_async().await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name, "memory-systems");
    assert_eq!(record.description, "");
    assert_eq!(record.body.chars().count(), 2000);
    assert_eq!(record.skill_md_url, format!("{base}/dl/SKILL.md"));
}

#[tokio::test]
async fn alternate_source_skips_failed_downloads_and_listing() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    listing(
        &mut server,
        ALT_LISTING,
        json!([
            { "name": "gone", "type": "dir", "url": format!("{base}/alt/gone") },
            { "name": "unlisted", "type": "dir", "url": format!("{base}/alt/unlisted") },
            { "name": "scripts", "type": "dir", "url": format!("{base}/alt/scripts") },
        ]),
    )
    .await;
    listing(
        &mut server,
        "/alt/gone",
        json!([{ "name": "README.md", "type": "file", "url": "", "download_url": format!("{base}/dl/gone.md") }]),
    )
    .await;
    server
        .mock("GET", "/dl/gone.md")
        .with_status(410)
        .create_async()
        .await;
    server
        .mock("GET", "/alt/unlisted")
        .with_status(500)
        .create_async()
        .await;
    listing(
        &mut server,
        "/alt/scripts",
        json!([{ "name": "run.py", "type": "file", "url": "", "download_url": format!("{base}/dl/run.py") }]),
    )
    .await;

    let builder = Builder::new(&config(&server, None));
    assert!(builder
        .fetch_alternate_source(&ALTERNATE_SOURCE)
        .await
        .is_empty());
}

#[tokio::test]
async fn alternate_listing_failure_yields_nothing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", ALT_LISTING)
        .with_status(404)
        .create_async()
        .await;

    let builder = Builder::new(&config(&server, None));
    assert!(builder
        .fetch_alternate_source(&ALTERNATE_SOURCE)
        .await
        .is_empty());
}
