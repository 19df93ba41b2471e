mod common;
use crate::common::builders::{CheckerOptionsBuilder, SiteBuilder, TEST_FROM, fake_checker};
use crate::common::fakes::{FakeFetcher, RecordingMailer};
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tempfile::tempdir;

use wcc::checker::{Checker, RunSummary, SiteOutcome};
use wcc::errors::Result as WccResult;
use wcc::notify::{Mailer, Notification};
use wcc::snapshot::{SnapshotStore, checksum};

type TestResult = Result<(), Box<dyn Error>>;

const PAGE: &str = "http://example.test/page";
const OTHER: &str = "https://other.test/news";

#[tokio::test]
async fn first_observation_seeds_snapshot_without_mail() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    fetcher.set_page(PAGE, "<p>Hello</p>");

    let site = SiteBuilder::new(PAGE).subscriber("a@x.test").build();
    let checker = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build());

    let summary = checker.run(std::slice::from_ref(&site)).await;

    assert_eq!(summary.first_seen, 1);
    assert!(mailer.sent().is_empty());

    let snapshot = SnapshotStore::new(dir.path())
        .load(&site.id())?
        .expect("snapshot should be created");
    assert_eq!(snapshot.checksum, checksum(b"<p>Hello</p>"));
    assert_eq!(snapshot.content, b"<p>Hello</p>");
    Ok(())
}

#[tokio::test]
async fn unchanged_content_leaves_snapshot_untouched() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    fetcher.set_page(PAGE, "<p>Hello</p>");
    let site = SiteBuilder::new(PAGE).subscriber("a@x.test").build();

    fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(std::slice::from_ref(&site))
        .await;

    let store = SnapshotStore::new(dir.path());
    let hash_path = store.hash_path(&site.id());
    let content_path = store.content_path(&site.id());
    let hash_before = fs::read(&hash_path)?;
    let content_before = fs::read(&content_path)?;
    let mtime_before = fs::metadata(&hash_path)?.modified()?;

    let checker = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build());
    let outcome = checker.check_site(&site).await?;

    assert_eq!(outcome, SiteOutcome::Unchanged);
    assert!(mailer.sent().is_empty());
    assert_eq!(fs::read(&hash_path)?, hash_before);
    assert_eq!(fs::read(&content_path)?, content_before);
    assert_eq!(fs::metadata(&hash_path)?.modified()?, mtime_before);
    Ok(())
}

#[tokio::test]
async fn change_mails_each_subscriber_once_then_updates_snapshot() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    let site = SiteBuilder::new(PAGE)
        .subscriber("a@x.test")
        .subscriber("Bee <b@x.test>")
        .build();
    let sites = vec![site.clone()];

    fetcher.set_page(PAGE, "<p>Hello</p>");
    fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(&sites)
        .await;

    fetcher.set_page(PAGE, "<p>Hello World</p>");
    let summary = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(&sites)
        .await;

    assert_eq!(
        summary,
        RunSummary {
            changed: 1,
            mails_sent: 2,
            ..RunSummary::default()
        }
    );

    let sent = mailer.sent();
    let recipients: Vec<&str> = sent.iter().map(|n| n.to.as_str()).collect();
    assert_eq!(recipients, vec!["a@x.test", "Bee <b@x.test>"]);

    for notification in &sent {
        assert_eq!(notification.from, TEST_FROM);
        assert_eq!(notification.subject, "[wcc-test] example.test changed");
        assert!(
            notification
                .body
                .starts_with("Change at http://example.test/page - diff follows:\n\n--- OLD\t(")
        );
        assert!(notification.body.contains("\n+++ NEW\t("));
        assert!(notification.body.contains("\n-<p>Hello</p>\n"));
        assert!(notification.body.contains("\n+<p>Hello World</p>\n"));
    }

    let snapshot = SnapshotStore::new(dir.path())
        .load(&site.id())?
        .expect("snapshot should exist");
    assert_eq!(snapshot.checksum, checksum(b"<p>Hello World</p>"));
    assert_eq!(snapshot.content, b"<p>Hello World</p>");

    // A further run with the same content is quiet again.
    let summary = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(&sites)
        .await;
    assert_eq!(summary.unchanged, 1);
    assert_eq!(mailer.sent().len(), 2);
    Ok(())
}

#[tokio::test]
async fn strip_markup_sites_get_tag_free_diffs() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    let site = SiteBuilder::new(PAGE)
        .strip_markup(true)
        .subscriber("a@x.test")
        .build();
    let options = || CheckerOptionsBuilder::new().build();

    fetcher.set_page(PAGE, "<ul>\n<li>Fish</li>\n</ul>\n");
    fake_checker(dir.path(), &fetcher, &mailer, options()).check_site(&site).await?;

    fetcher.set_page(PAGE, "<ul>\n<li>Fish &amp; Chips</li>\n</ul>\n");
    let outcome = fake_checker(dir.path(), &fetcher, &mailer, options()).check_site(&site).await?;
    assert_eq!(outcome, SiteOutcome::Changed { notified: 1, failed: 0 });

    let sent = mailer.sent();
    let body = &sent[0].body;
    assert!(!body.contains("<li>"));
    assert!(body.contains("\n- Fish \n"));
    assert!(body.contains("\n+ Fish & Chips \n"));
    Ok(())
}

#[tokio::test]
async fn failing_site_does_not_stop_the_run() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    fetcher.set_unreachable(PAGE, "connection refused");
    fetcher.set_page(OTHER, "<p>news</p>");

    let sites = vec![
        SiteBuilder::new(PAGE).subscriber("a@x.test").build(),
        SiteBuilder::new(OTHER).subscriber("a@x.test").build(),
    ];

    let summary = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(&sites)
        .await;

    assert_eq!(summary.failed_sites, 1);
    assert_eq!(summary.first_seen, 1);
    assert_eq!(summary.sites(), 2);
    assert!(summary.has_failures());
    assert_eq!(fetcher.requests(), vec![PAGE, OTHER]);

    let store = SnapshotStore::new(dir.path());
    assert!(store.load(&sites[0].id())?.is_none());
    assert!(store.load(&sites[1].id())?.is_some());
    Ok(())
}

#[tokio::test]
async fn undecodable_content_fails_only_that_site() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    fetcher.set_page(PAGE, b"<p>caf\xe9</p>".to_vec());
    fetcher.set_page(OTHER, "<p>fine</p>");

    let sites = vec![
        SiteBuilder::new(PAGE).build(),
        SiteBuilder::new(OTHER).build(),
    ];
    let summary = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .run(&sites)
        .await;

    assert_eq!(summary.failed_sites, 1);
    assert_eq!(summary.first_seen, 1);
    assert!(SnapshotStore::new(dir.path()).load(&sites[0].id())?.is_none());
    Ok(())
}

#[tokio::test]
async fn rejected_subscriber_does_not_block_the_others() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    mailer.reject("a@x.test");
    let site = SiteBuilder::new(PAGE)
        .subscriber("a@x.test")
        .subscriber("b@x.test")
        .build();

    fetcher.set_page(PAGE, "v1\n");
    fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .check_site(&site)
        .await?;

    fetcher.set_page(PAGE, "v2\n");
    let outcome = fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .check_site(&site)
        .await?;

    assert_eq!(outcome, SiteOutcome::Changed { notified: 1, failed: 1 });
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "b@x.test");

    let snapshot = SnapshotStore::new(dir.path())
        .load(&site.id())?
        .expect("snapshot should exist");
    assert_eq!(snapshot.content, b"v2\n");
    Ok(())
}

#[tokio::test]
async fn simulate_neither_mails_nor_saves() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    let site = SiteBuilder::new(PAGE).subscriber("a@x.test").build();
    let simulate = || CheckerOptionsBuilder::new().simulate(true).build();

    fetcher.set_page(PAGE, "v1\n");
    let outcome = fake_checker(dir.path(), &fetcher, &mailer, simulate()).check_site(&site).await?;
    assert_eq!(outcome, SiteOutcome::FirstSeen);
    assert!(SnapshotStore::new(dir.path()).load(&site.id())?.is_none());

    fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .check_site(&site)
        .await?;

    fetcher.set_page(PAGE, "v2\n");
    let outcome = fake_checker(dir.path(), &fetcher, &mailer, simulate()).check_site(&site).await?;
    assert_eq!(outcome, SiteOutcome::Changed { notified: 0, failed: 0 });
    assert!(mailer.sent().is_empty());

    let snapshot = SnapshotStore::new(dir.path())
        .load(&site.id())?
        .expect("snapshot should exist");
    assert_eq!(snapshot.content, b"v1\n");
    Ok(())
}

#[tokio::test]
async fn no_mails_still_updates_snapshot() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    let site = SiteBuilder::new(PAGE).subscriber("a@x.test").build();
    let quiet = || CheckerOptionsBuilder::new().send_mails(false).build();

    fetcher.set_page(PAGE, "v1\n");
    fake_checker(dir.path(), &fetcher, &mailer, quiet()).check_site(&site).await?;
    fetcher.set_page(PAGE, "v2\n");
    let outcome = fake_checker(dir.path(), &fetcher, &mailer, quiet()).check_site(&site).await?;

    assert_eq!(outcome, SiteOutcome::Changed { notified: 0, failed: 0 });
    assert!(mailer.sent().is_empty());
    let snapshot = SnapshotStore::new(dir.path())
        .load(&site.id())?
        .expect("snapshot should exist");
    assert_eq!(snapshot.checksum, checksum(b"v2\n"));
    Ok(())
}

/// Delivers like `RecordingMailer`, but first puts a directory where the
/// snapshot content file lives, so the following save fails.
struct BlockingMailer {
    inner: RecordingMailer,
    blocked: PathBuf,
}

impl Mailer for BlockingMailer {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = WccResult<()>> + Send + 'a>> {
        let _ = fs::remove_file(&self.blocked);
        fs::create_dir_all(&self.blocked).expect("failed to block content file");
        self.inner.send(notification)
    }
}

#[tokio::test]
async fn failed_save_after_mailing_still_counts_sent_mail() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let fetcher = FakeFetcher::new();
    let mailer = RecordingMailer::new();
    let site = SiteBuilder::new(PAGE).subscriber("a@x.test").build();

    fetcher.set_page(PAGE, "v1\n");
    fake_checker(dir.path(), &fetcher, &mailer, CheckerOptionsBuilder::new().build())
        .check_site(&site)
        .await?;

    fetcher.set_page(PAGE, "v2\n");
    let store = SnapshotStore::new(dir.path());
    let blocking = BlockingMailer {
        inner: mailer.clone(),
        blocked: store.content_path(&site.id()),
    };
    let checker = Checker::new(
        fetcher.clone(),
        blocking,
        SnapshotStore::new(dir.path()),
        CheckerOptionsBuilder::new().build(),
    );

    let summary = checker.run(std::slice::from_ref(&site)).await;

    assert_eq!(summary.failed_sites, 1);
    assert_eq!(summary.changed, 0);
    assert_eq!(summary.mails_sent, 1);
    assert_eq!(mailer.sent().len(), 1);

    let stored = fs::read_to_string(store.hash_path(&site.id()))?;
    assert_eq!(stored.trim_end(), checksum(b"v1\n"));
    Ok(())
}
