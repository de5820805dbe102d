use libtagalias::{
    Client, DigestMatcher, ImageReference, NotFoundPolicy, TagAliasError, TokenService,
    select_tags,
};
use mockito::Matcher;
use std::num::NonZeroUsize;
use std::time::Duration;

const D: &str = "sha256:1111111111111111111111111111111111111111111111111111111111111111";
const X: &str = "sha256:2222222222222222222222222222222222222222222222222222222222222222";

fn manifest(digest: &str) -> String {
    format!(
        r#"{{"schemaVersion":2,"config":{{"mediaType":"application/vnd.docker.container.image.v1+json","size":7023,"digest":"{}"}},"layers":[]}}"#,
        digest
    )
}

fn mock_manifest(server: &mut mockito::Server, tag: &str, status: usize, digest: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/v2/org/app/manifests/{}", tag).as_str())
        .match_header("authorization", "Bearer tok")
        .with_status(status)
        .with_body(if status == 200 {
            manifest(digest)
        } else {
            r#"{"errors":[{"code":"MANIFEST_UNKNOWN"}]}"#.to_string()
        })
        .create()
}

#[test]
fn test_version_is_not_empty() {
    assert!(!libtagalias::version().is_empty());
}

#[test]
fn test_full_alias_scan() {
    let mut server = mockito::Server::new();

    let token_mock = server
        .mock("GET", "/token")
        .match_query(Matcher::UrlEncoded(
            "scope".into(),
            "repository:org/app:pull".into(),
        ))
        .with_status(200)
        .with_body(r#"{"token":"tok"}"#)
        .expect(1)
        .create();

    let _tags_mock = server
        .mock("GET", "/v2/org/app/tags/list")
        .with_status(200)
        .with_body(
            r#"{"name":"org/app","tags":["1.7","1.7.2","1.7.3","1.7-windows","latest","1.7.1"]}"#,
        )
        .create();

    // 1.7 is the target; 1.7.1 disappeared between listing and resolving
    let _m_17 = mock_manifest(&mut server, "1.7", 200, D);
    let _m_173 = mock_manifest(&mut server, "1.7.3", 200, D);
    let _m_172 = mock_manifest(&mut server, "1.7.2", 200, X);
    let _m_171 = mock_manifest(&mut server, "1.7.1", 404, "");

    let reference: ImageReference = "org/app:1.7".parse().unwrap();
    let client = Client::new(&format!("{}/v2", server.url())).unwrap();
    let service = TokenService::new(server.url(), "registry.example.com");

    let token = client.authenticate(&service, reference.repository()).unwrap();
    let tags = client.fetch_tag_list(reference.repository(), &token).unwrap();
    let selection = select_tags(&tags, "1.7", NonZeroUsize::new(25).unwrap());
    assert_eq!(selection.tags, vec!["1.7.3", "1.7.2", "1.7.1", "1.7"]);
    assert_eq!(selection.total, 6);

    let target = client
        .fetch_digest(reference.repository(), reference.tag(), &token, NotFoundPolicy::Fatal)
        .unwrap()
        .unwrap();

    let matcher = DigestMatcher::new(Duration::ZERO);
    let matches: Vec<&str> = matcher
        .find_matches(&target, &selection.tags, |tag| {
            client.fetch_digest(reference.repository(), tag, &token, NotFoundPolicy::Tolerate)
        })
        .collect::<libtagalias::Result<_>>()
        .unwrap();

    token_mock.assert();
    assert_eq!(matches, vec!["1.7.3", "1.7"]);
}

#[test]
fn test_target_not_found_is_fatal() {
    let mut server = mockito::Server::new();
    let _m = mock_manifest(&mut server, "gone", 404, "");

    let client = Client::new(&format!("{}/v2", server.url())).unwrap();
    let token = libtagalias::AuthToken::new("tok");
    let err = client
        .fetch_digest("org/app", "gone", &token, NotFoundPolicy::Fatal)
        .unwrap_err();

    assert!(matches!(
        err,
        TagAliasError::Registry {
            status_code: 404,
            ..
        }
    ));
}
