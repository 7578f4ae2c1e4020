use std::time::SystemTime;

use rustls::{
    client::{ServerCertVerified, ServerCertVerifier},
    Certificate, Error, ServerName,
};

/// Accepts any server certificate.
///
/// Gemini servers overwhelmingly use self-signed certificates, so there is
/// no chain to check against.
pub struct NoVerify;

impl ServerCertVerifier for NoVerify {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, Error> {
        log::trace!("accepting certificate for {:?}", server_name);
        Ok(ServerCertVerified::assertion())
    }
}
