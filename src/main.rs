use argh::FromArgs;
use gemini_response::{request_line, Agent, AgentError, Response};
use std::{io::Write, process::ExitCode};
use url::Url;

#[derive(FromArgs)]
/// gURL
struct Args {
    #[argh(positional)]
    url: Url,

    /// port to connect to, overriding the one in the url
    #[argh(option)]
    port: Option<u16>,

    /// print the request line instead of sending it
    #[argh(switch)]
    request_line: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.request_line {
        print!("{}", request_line(&args.url));
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AgentError> {
    let mut req = Agent::get(args.url)?;
    if let Some(port) = args.port {
        req = req.with_port(port);
    }

    match req.run()? {
        Response::Input(resp) => {
            eprintln!("status: {}", resp.status);
            eprintln!("prompt: {}", resp.prompt);
        }
        Response::Redirect(resp) => {
            eprintln!("status: {}", resp.status);
            match resp.resolve(req.url()) {
                Ok(target) => eprintln!("redirect: {}", target),
                Err(_) => eprintln!("redirect: {}", resp.uri),
            }
        }
        Response::Success(resp) => {
            eprintln!("status: {}", resp.status);
            eprintln!("mime: {}", resp.mime_type);
            for (name, value) in &resp.mime_type_params {
                eprintln!("  {}={}", name, value);
            }

            std::io::stdout().write_all(resp.body())?;
        }
    }

    Ok(())
}
