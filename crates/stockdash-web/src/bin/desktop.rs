//! Native window around the dashboard. Built with `--features desktop`.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use stockdash_web::{serve, Settings};
use tao::{
    dpi::{LogicalPosition, LogicalSize},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use tracing::{error, info};
use wry::WebViewBuilder;

#[derive(Parser, Debug)]
#[command(version, about = "Open the stock dashboard in a desktop window", long_about = None)]
struct Args {
    /// Page to load; the dashboard server must already be reachable here
    #[arg(long, default_value = "http://127.0.0.1:8050/")]
    url: String,

    /// Start the dashboard server on 127.0.0.1:8050 in this process first
    #[arg(long)]
    serve: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    if args.serve {
        let settings = Settings::from_env("127.0.0.1", 8050);
        std::thread::spawn(move || {
            if let Err(e) = actix_web::rt::System::new().block_on(serve(settings)) {
                error!("dashboard server stopped: {e:#}");
            }
        });
    }

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Stock Market Dashboard")
        .with_position(LogicalPosition::new(100.0, 100.0))
        .with_inner_size(LogicalSize::new(1200.0, 800.0))
        .build(&event_loop)?;

    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    ))]
    let builder = WebViewBuilder::new(&window);

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )))]
    let builder = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| anyhow::anyhow!("window has no GTK container"))?;
        WebViewBuilder::new_gtk(vbox)
    };

    info!("Loading {}", args.url);
    let _webview = builder.with_url(&args.url).build()?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            *control_flow = ControlFlow::Exit;
        }
    });
}
