use mio::net::TcpStream;
use std::{
    io::{self, Read, Write},
    net::{SocketAddr, ToSocketAddrs},
    sync::Arc,
};
use url::{Host, Url};

mod cert;
use cert::NoVerify;
pub mod response;
pub use response::{
    InputResponse, RedirectResponse, Response, ResponseError, ResponseKind, SuccessResponse,
};

pub const SCHEME: &str = "gemini";
pub const DEFAULT_PORT: u16 = 1965;
pub const CRLF: &str = "\r\n";

/// The line a client sends to request `url`.
pub fn request_line(url: &Url) -> String {
    url.to_string() + CRLF
}

/// Request line for the root of `authority` on the default port.
pub fn absolute_uri(authority: &str) -> String {
    let authority = authority.strip_suffix('/').unwrap_or(authority);
    format!("{SCHEME}://{authority}:{DEFAULT_PORT}/{CRLF}")
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("url has no host")]
    UrlError,
    #[error("could not resolve {0}")]
    Resolve(String),
    #[error("connection failed: {0}")]
    Io(#[from] io::Error),
    #[error("tls: {0}")]
    Tls(#[from] rustls::Error),
    #[error("invalid server name {0}")]
    ServerName(String),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

pub struct Agent;

impl Agent {
    pub fn get(url: Url) -> Result<Request, AgentError> {
        let host = url.host().ok_or(AgentError::UrlError)?;

        Ok(Request {
            host: host.to_owned(),
            port: url.port().unwrap_or(DEFAULT_PORT),
            url,
        })
    }
}

#[derive(Debug)]
pub struct Request {
    host: Host,
    url: Url,
    port: u16,
}

const CLIENT: mio::Token = mio::Token(0);

struct GeminiClient<S> {
    socket: S,
    tls_conn: rustls::ClientConnection,
    closing: bool,
    clean_closure: bool,
    failure: Option<AgentError>,
    output: Vec<u8>,
}

impl<S: Read + Write> GeminiClient<S> {
    fn new(
        socket: S,
        server_name: rustls::ServerName,
        cfg: Arc<rustls::ClientConfig>,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            socket,
            tls_conn: rustls::ClientConnection::new(cfg, server_name)?,
            closing: false,
            clean_closure: false,
            failure: None,
            output: Vec::new(),
        })
    }

    fn do_read(&mut self) -> Result<(), AgentError> {
        match self.tls_conn.read_tls(&mut self.socket) {
            Err(err) => {
                if err.kind() == io::ErrorKind::WouldBlock {
                    return Ok(());
                }
                log::error!("read error: {}", err);
                self.failure = Some(err.into());
                self.closing = true;
                return Ok(());
            }

            // eof without close_notify, the response may be truncated
            Ok(0) => {
                self.closing = true;
                return Ok(());
            }

            Ok(_) => {}
        }

        let io_state = match self.tls_conn.process_new_packets() {
            Ok(s) => s,
            Err(err) => {
                log::error!("tls error: {}", err);
                self.failure = Some(err.into());
                self.closing = true;
                return Ok(());
            }
        };

        if io_state.plaintext_bytes_to_read() > 0 {
            let mut data = vec![0; io_state.plaintext_bytes_to_read()];
            self.tls_conn.reader().read_exact(&mut data)?;
            self.output.extend_from_slice(&data);
        }

        if io_state.peer_has_closed() {
            self.clean_closure = true;
            self.closing = true;
        }

        Ok(())
    }

    fn do_write(&mut self) -> Result<(), AgentError> {
        self.tls_conn.write_tls(&mut self.socket)?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closing
    }

    /// Turns the closed connection into its output, or the error that closed it.
    fn finish(mut self) -> Result<Vec<u8>, AgentError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        if !self.clean_closure {
            log::warn!("connection closed without close_notify");
        }

        log::debug!("received {} bytes", self.output.len());
        Ok(self.output)
    }

    fn event_set(&self) -> mio::Interest {
        let rd = self.tls_conn.wants_read();
        let wr = self.tls_conn.wants_write();

        if rd && wr {
            mio::Interest::READABLE | mio::Interest::WRITABLE
        } else if wr {
            mio::Interest::WRITABLE
        } else {
            mio::Interest::READABLE
        }
    }
}

impl<S: Read + Write + mio::event::Source> GeminiClient<S> {
    /// Consumes self, returning every plaintext byte the server sent.
    fn request(mut self, url: &Url) -> Result<Vec<u8>, AgentError> {
        self.tls_conn
            .writer()
            .write_all(request_line(url).as_bytes())?;

        let mut poll = mio::Poll::new()?;
        let mut events = mio::Events::with_capacity(8);
        self.register(poll.registry())?;

        loop {
            poll.poll(&mut events, None)?;

            for ev in events.iter() {
                self.ready(ev)?;
                self.reregister(poll.registry())?;
            }

            if self.is_closed() {
                break;
            }
        }

        self.finish()
    }

    fn ready(&mut self, ev: &mio::event::Event) -> Result<(), AgentError> {
        debug_assert_eq!(ev.token(), CLIENT);

        if ev.is_readable() {
            self.do_read()?;
        }

        if ev.is_writable() {
            self.do_write()?;
        }

        Ok(())
    }

    fn register(&mut self, registry: &mio::Registry) -> io::Result<()> {
        let interest = self.event_set();
        registry.register(&mut self.socket, CLIENT, interest)
    }

    fn reregister(&mut self, registry: &mio::Registry) -> io::Result<()> {
        let interest = self.event_set();
        registry.reregister(&mut self.socket, CLIENT, interest)
    }
}

fn client_config() -> Arc<rustls::ClientConfig> {
    let verifier = NoVerify;

    let config = rustls::ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Arc::new(config)
}

impl Request {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the raw response bytes.
    pub fn fetch(&self) -> Result<Vec<u8>, AgentError> {
        let config = client_config();

        let host = self.host.to_string();
        let name = rustls::ServerName::try_from(host.as_str())
            .map_err(|_| AgentError::ServerName(host.clone()))?;
        let address: SocketAddr = format!("{}:{}", host, self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| AgentError::Resolve(host.clone()))?;

        log::debug!("connecting to {} ({})", host, address);
        let sock = TcpStream::connect(address)?;

        let gem = GeminiClient::new(sock, name, config)?;

        gem.request(&self.url)
    }

    pub fn run(&self) -> Result<Response, AgentError> {
        let raw = self.fetch()?;
        Ok(Response::from_raw(&raw)?)
    }
}
