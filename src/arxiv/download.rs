use std::fmt;
use std::pin::pin;
use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt};
use tokio::{fs as tokio_fs, io::AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::arxiv::client::ArxivClient;
use crate::arxiv::models::{ArticleRecord, DownloadReport};
use crate::error::{ArxivError, DownloadError, Result};

impl ArxivClient {
    /// Download the PDF of every record into `output_dir`
    ///
    /// Each file is written as `<output_dir>/<id>.pdf`, replacing any existing file.
    /// Records without a PDF URL are skipped. A record that fails is reported in
    /// [`DownloadReport::failures`] and the remaining records are still attempted.
    ///
    /// # Errors
    ///
    /// Returns `ArxivError::IoError` if the output directory cannot be created.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use arxiv_client::{ArxivClient, SearchRequest};
    /// use arxiv_client::query::build_category_query;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ArxivClient::new();
    ///     let request = SearchRequest::new(build_category_query(&["q-bio.NC"])).range(0, 5);
    ///     let articles = client.fetch_articles(&request).await?;
    ///
    ///     let report = client.download_articles(&articles, "./pdfs").await?;
    ///     for failure in &report.failures {
    ///         eprintln!("{}", failure);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, records, output_dir), fields(count = records.len(), dir = %output_dir.as_ref().display()))]
    pub async fn download_articles(
        &self,
        records: &[ArticleRecord],
        output_dir: impl AsRef<Path>,
    ) -> Result<DownloadReport> {
        let output_dir = output_dir.as_ref();
        tokio_fs::create_dir_all(output_dir)
            .await
            .map_err(|e| ArxivError::IoError {
                path: output_dir.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;

        let mut report = DownloadReport::default();
        for record in records {
            if record.pdf_url.is_empty() {
                debug!(id = %record.id, "No PDF URL, skipping");
                report.skipped += 1;
                continue;
            }

            let path = output_dir.join(record.pdf_file_name());
            match self.download_one(&record.pdf_url, &path).await {
                Ok(()) => {
                    debug!(id = %record.id, path = %path.display(), "PDF saved");
                    report.downloaded.push(path);
                }
                Err(e) => {
                    warn!(id = %record.id, url = %record.pdf_url, error = %e, "PDF download failed");
                    report.failures.push(DownloadError {
                        id: record.id.clone(),
                        url: record.pdf_url.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            downloaded = report.downloaded.len(),
            skipped = report.skipped,
            failed = report.failures.len(),
            "Download completed"
        );
        Ok(report)
    }

    /// Stream one document to `path`
    async fn download_one(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.make_request(url).await?;
        save_stream(response.bytes_stream(), url, path).await
    }
}

/// Write a byte stream to `path` through a `.part` file in the same directory
///
/// `path` is only replaced once the whole body has been written. On failure the
/// partial file is removed and any existing `path` is left untouched.
async fn save_stream<S, B, E>(stream: S, url: &str, path: &Path) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let result = match write_part(stream, url, &part).await {
        Ok(()) => tokio_fs::rename(&part, path)
            .await
            .map_err(|e| ArxivError::IoError {
                path: path.to_path_buf(),
                message: format!("Failed to move downloaded file into place: {}", e),
            }),
        Err(e) => Err(e),
    };

    if result.is_err() {
        if let Err(remove_err) = tokio_fs::remove_file(&part).await {
            debug!(path = %part.display(), error = %remove_err, "No partial file to remove");
        }
    }
    result
}

async fn write_part<S, B, E>(stream: S, url: &str, part: &Path) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let io_error = |message: String| ArxivError::IoError {
        path: part.to_path_buf(),
        message,
    };

    let mut file = tokio_fs::File::create(part)
        .await
        .map_err(|e| io_error(format!("Failed to create file: {}", e)))?;

    let mut stream = pin!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ArxivError::FetchError {
            url: url.to_string(),
            status: None,
            message: format!("Body stream failed: {}", e),
        })?;
        file.write_all(chunk.as_ref())
            .await
            .map_err(|e| io_error(format!("Failed to write file: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| io_error(format!("Failed to flush file: {}", e)))?;

    Ok(())
}
