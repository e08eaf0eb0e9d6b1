use crate::cli::params::{IndexSource, MirrorParams};
use crate::error::FwMirrorError;
use crate::fetch::{
    FetchObserver, FetchOptions, FetchSummary, Fetcher, HttpTransport, TracingObserver, Transport,
    fetch_index,
};
use crate::index;

pub async fn run_mirror(params: MirrorParams) -> Result<FetchSummary, FwMirrorError> {
    let transport = HttpTransport::new(&params.http)?;
    mirror_index(transport, TracingObserver::default(), &params).await
}

/// Loads the index and mirrors every image it lists.
///
/// Fails only when the index cannot be obtained, does not parse, or lists no
/// devices. Per-image problems are reported in the returned summary.
pub async fn mirror_index<T: Transport, O: FetchObserver>(
    transport: T,
    observer: O,
    params: &MirrorParams,
) -> Result<FetchSummary, FwMirrorError> {
    tracing::info!(
        index = %params.index_source,
        output = %params.output_dir.display(),
        "Mirroring firmware index"
    );

    let firmware_index = match &params.index_source {
        IndexSource::Url(url) => {
            let xml = fetch_index(&transport, url.as_str()).await?;
            tracing::info!("Parsing firmware index...");
            index::parse(&xml)?
        }
        IndexSource::File(path) => {
            tracing::info!("Parsing firmware index from {}", path.display());
            index::parse_file(path)?
        }
    };

    if firmware_index.is_empty() {
        return Err(FwMirrorError::EmptyIndex {
            index: params.index_source.to_string(),
        });
    }
    tracing::info!("Found {} device(s)", firmware_index.devices.len());

    std::fs::create_dir_all(&params.output_dir).map_err(|e| {
        FwMirrorError::OutputDirectoryCreation {
            path: params.output_dir.clone(),
            reason: e.to_string(),
        }
    })?;

    let mut fetcher = Fetcher::new(
        transport,
        observer,
        FetchOptions {
            output_dir: params.output_dir.clone(),
            scheme: params.http.scheme.clone(),
        },
    );
    Ok(fetcher.fetch_all(&firmware_index).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::fetch::NoopObserver;
    use crate::fetch::testing::{Scripted, ScriptedTransport};
    use std::path::Path;

    const INDEX_URL: &str = "https://releases.example.com/index.xml";

    fn params(index_source: IndexSource, output_dir: &Path) -> MirrorParams {
        MirrorParams {
            index_source,
            output_dir: output_dir.to_path_buf(),
            http: HttpConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_unreachable_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let transport = ScriptedTransport::default().with(INDEX_URL, Scripted::Refused);

        let result = mirror_index(
            transport,
            NoopObserver,
            &params(IndexSource::parse(INDEX_URL), dir.path()),
        )
        .await;

        assert!(matches!(result, Err(FwMirrorError::IndexFetch(_))));
    }

    #[tokio::test]
    async fn test_malformed_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let transport = ScriptedTransport::default().with(
            INDEX_URL,
            Scripted::Body(b"<INDEX><DEVICE></INDEX>".to_vec()),
        );

        let result = mirror_index(
            transport,
            NoopObserver,
            &params(IndexSource::parse(INDEX_URL), dir.path()),
        )
        .await;

        assert!(matches!(result, Err(FwMirrorError::IndexParse(_))));
    }

    #[tokio::test]
    async fn test_index_without_devices_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let transport = ScriptedTransport::default().with(
            INDEX_URL,
            Scripted::Body(b"<INDEX REVISION=\"1\"></INDEX>".to_vec()),
        );

        let result = mirror_index(
            transport,
            NoopObserver,
            &params(IndexSource::parse(INDEX_URL), dir.path()),
        )
        .await;

        assert!(matches!(result, Err(FwMirrorError::EmptyIndex { .. })));
    }

    #[tokio::test]
    async fn test_output_directory_blocked_by_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.xml");
        std::fs::write(
            &index_path,
            r#"<INDEX REVISION="1"><DEVICE ID="d"><HARDWARE REVISION="h">
  <RELEASE CHANNEL="stable" DATE="2024-01-01" HTTPHOST="fw.example.com" URLPATH="/fw/" REVISION="v2">
    <IMAGE FILENAME="fw.bin" MD5="5eb63bbbe01eeed093cb22bb8f5acdc3" />
  </RELEASE>
</HARDWARE></DEVICE></INDEX>"#,
        )
        .unwrap();
        let output_dir = dir.path().join("mirror");
        std::fs::write(&output_dir, b"not a directory").unwrap();

        let result = mirror_index(
            ScriptedTransport::default(),
            NoopObserver,
            &params(IndexSource::File(index_path), &output_dir),
        )
        .await;

        match result {
            Err(FwMirrorError::OutputDirectoryCreation { path, .. }) => {
                assert_eq!(path, output_dir)
            }
            other => panic!("Expected output directory failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_local_index_file_is_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.xml");
        std::fs::write(
            &index_path,
            r#"<INDEX REVISION="1">
  <DEVICE ID="d"><HARDWARE REVISION="h">
    <RELEASE CHANNEL="stable" DATE="2024-01-01" HTTPHOST="fw.example.com" URLPATH="/fw/" REVISION="v2">
      <IMAGE FILENAME="fw.bin" MD5="5EB63BBBE01EEED093CB22BB8F5ACDC3" />
      <IMAGE FILENAME="missing.bin" MD5="d41d8cd98f00b204e9800998ecf8427e" />
    </RELEASE>
  </HARDWARE></DEVICE>
</INDEX>"#,
        )
        .unwrap();
        let output_dir = dir.path().join("mirror");
        let transport = ScriptedTransport::default().with(
            "https://fw.example.com/fw/fw.bin",
            Scripted::Body(b"hello world".to_vec()),
        );

        let summary = mirror_index(
            transport,
            NoopObserver,
            &params(IndexSource::File(index_path), &output_dir),
        )
        .await
        .unwrap();

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.verified(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(
            std::fs::read(output_dir.join("stable/2024-01-01/v2/fw.bin")).unwrap(),
            b"hello world"
        );
        assert!(!output_dir.join("stable/2024-01-01/v2/missing.bin").exists());
    }
}
