mod config;
mod drivers;

use std::io::Write;

use aqi_gauge_common::*;
use aqi_gauge_core::{DisplayService, PollerService, SharedDisplayState};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use tokio::task::{JoinHandle, LocalSet};

use config::SimulatorConfig;
use drivers::{ConsoleGauge, FixtureTransport, ReqwestTransport, SimulatorTransport};

type Poller = PollerService<
    'static,
    SimulatorTransport,
    CriticalSectionRawMutex,
    RESPONSE_BUFFER_CAPACITY,
>;
type Display<W> = DisplayService<'static, CriticalSectionRawMutex, ConsoleGauge<W>>;

static DISPLAY_STATE: StaticCell<SharedDisplayState<CriticalSectionRawMutex>> = StaticCell::new();

/// 轮询任务和渲染任务分别启动，互不等待
fn spawn_tasks<W: Write + 'static>(
    tasks: &LocalSet,
    mut poller: Poller,
    mut display: Display<W>,
) -> [JoinHandle<()>; 2] {
    let poller_task = tasks.spawn_local(async move { poller.run().await });
    let display_task = tasks.spawn_local(async move {
        display.initialize();
        display.run(DEFAULT_RENDER_PERIOD).await
    });
    [poller_task, display_task]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SimulatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };

    let transport = match &config.fixture {
        Some(path) => {
            info!("Replaying fixture {}", path.display());
            SimulatorTransport::Fixture(FixtureTransport::new(path.clone()))
        }
        None => match ReqwestTransport::new() {
            Ok(transport) => SimulatorTransport::Http(transport),
            Err(e) => {
                error!("HTTP client init error: {}", e);
                return;
            }
        },
    };

    let display_state: &'static SharedDisplayState<_> =
        DISPLAY_STATE.init(SharedDisplayState::new());

    let poller = Poller::new(transport, config.poller, display_state);
    let display = DisplayService::new(display_state, ConsoleGauge::stdout());

    let tasks = LocalSet::new();
    let handles = spawn_tasks(&tasks, poller, display);
    tasks
        .run_until(async move {
            for handle in handles {
                if let Err(e) = handle.await {
                    error!("Task error: {}", e);
                }
            }
        })
        .await;
}
