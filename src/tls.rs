//! rustls configuration for the array's HTTPS endpoint

use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use rustls::pki_types::CertificateDer;
use tracing::debug;

use crate::config::TlsVerification;
use crate::error::{Error, Result};

/// Certificate verifier that accepts any certificate.
/// Used when verification is disabled.
struct InsecureVerifier {
    provider: Arc<rustls::crypto::CryptoProvider>,
}

impl fmt::Debug for InsecureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsecureVerifier").finish()
    }
}

impl rustls::client::danger::ServerCertVerifier for InsecureVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Read every PEM certificate at `path`. Directories are scanned one level deep.
pub(crate) fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let files = if path.is_dir() {
        let mut files = fs::read_dir(path)
            .map_err(|e| Error::Tls(format!("Failed to read cert directory '{}': {}", path.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect::<Vec<_>>();
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut certs = Vec::new();
    for file in &files {
        let handle = File::open(file)
            .map_err(|e| Error::Tls(format!("Failed to open cert '{}': {}", file.display(), e)))?;
        let parsed = rustls_pemfile::certs(&mut BufReader::new(handle))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Tls(format!("Failed to parse cert '{}': {}", file.display(), e)))?;
        certs.extend(parsed);
    }

    if certs.is_empty() {
        return Err(Error::Tls(format!(
            "No certificates found at '{}'",
            path.display()
        )));
    }

    debug!("Loaded {} certificate(s) from {}", certs.len(), path.display());
    Ok(certs)
}

/// Build a rustls ClientConfig for the configured verification mode.
pub(crate) fn build_tls_config(verification: &TlsVerification) -> Result<rustls::ClientConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let builder = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Tls(e.to_string()))?;

    match verification {
        TlsVerification::Disabled => {
            let verifier = Arc::new(InsecureVerifier { provider });
            Ok(builder
                .dangerous()
                .with_custom_certificate_verifier(verifier)
                .with_no_client_auth())
        }
        TlsVerification::VerifyWith(path) => {
            let mut roots = rustls::RootCertStore::empty();
            for cert in load_certificates(path)? {
                roots
                    .add(cert)
                    .map_err(|e| Error::Tls(format!("Invalid certificate in '{}': {}", path.display(), e)))?;
            }
            Ok(builder.with_root_certificates(roots).with_no_client_auth())
        }
        TlsVerification::Verify => {
            let mut roots = rustls::RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            Ok(builder.with_root_certificates(roots).with_no_client_auth())
        }
    }
}
