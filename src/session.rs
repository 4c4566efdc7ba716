use std::rc::Rc;

use crate::bridge::{BridgeStats, EventBridge};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::page::PageHost;
use crate::runtime::{RuntimeHost, RuntimeLoader};

/// A started game session: runtime loaded, surface on the page and the
/// event bridge forwarding input.
pub struct Session<H: PageHost, R: RuntimeHost + 'static> {
    // The bridge must be declared first so its listeners are removed
    // before the runtime and surface they point at are released.
    bridge: EventBridge<H>,
    surface: H::Surface,
    runtime: Rc<R>,
    config: SessionConfig,
}

impl<H: PageHost, R: RuntimeHost + 'static> Session<H, R> {
    /// Runs the startup sequence: acquire runtime, install package,
    /// create surface, install bridge. Stops at the first failure.
    pub async fn start<L>(config: SessionConfig, loader: &L, host: Rc<H>) -> Result<Self, SessionError>
    where
        L: RuntimeLoader<Runtime = R>,
    {
        config.validate()?;

        log::info!("loading runtime from {}", config.index_url);
        let runtime = loader
            .load(&config.index_url)
            .await
            .map_err(SessionError::Acquisition)?;

        log::info!("installing package {}", config.package);
        runtime
            .load_package(&config.package)
            .await
            .map_err(SessionError::Acquisition)?;
        let runtime = Rc::new(runtime);

        let surface = host.create_surface(&config.surface).map_err(SessionError::Surface)?;
        log::info!(
            "created surface #{} ({}x{})",
            config.surface.id,
            config.surface.width,
            config.surface.height
        );

        let mut bridge = EventBridge::new(Rc::clone(&host), config.bridge);
        let shared: Rc<dyn RuntimeHost> = runtime.clone();
        bridge.install(&config.surface.id, shared)?;

        Ok(Session {
            bridge,
            surface,
            runtime,
            config,
        })
    }

    /// Runs the game entry point to completion, then tears the bridge down.
    pub async fn run(mut self) -> Result<BridgeStats, SessionError> {
        log::info!("running game entry point");
        let result = self.runtime.run_async(&self.config.entry_code).await;
        let stats = self.bridge.stats();
        self.bridge.uninstall();
        match result {
            Ok(()) => {
                log::info!("game exited: {:?}", stats);
                Ok(stats)
            }
            Err(err) => Err(SessionError::Execution(err)),
        }
    }

    pub fn bridge(&self) -> &EventBridge<H> {
        &self.bridge
    }

    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Starts a session and runs the game to completion.
pub async fn launch<H, L>(config: SessionConfig, loader: &L, host: Rc<H>) -> Result<BridgeStats, SessionError>
where
    H: PageHost,
    L: RuntimeLoader,
{
    let session = Session::<H, L::Runtime>::start(config, loader, host).await?;
    session.run().await
}
