use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::input::DeliveryInput;
use crate::workflow::runner::Runner;
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

type SharedModel = Arc<RwLock<VisualizationModel>>;

fn store(state: &SharedModel, model: VisualizationModel) -> Result<()> {
    let mut guard = state
        .write()
        .map_err(|_| anyhow!("visualization state lock poisoned"))?;
    *guard = model;
    Ok(())
}

/// Hosts the read-only snapshot endpoint and accepts new deliveries.
pub struct GuiBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    /// `GET /analysis`, `GET /metrics`, `POST /ingest`.
    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
    {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let analysis_route = warp::path("analysis")
            .and(warp::path::end())
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let model = state.read().map(|guard| guard.clone()).unwrap_or_default();
                warp::reply::json(&model)
            });

        let metrics_route = warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Runner>| warp::reply::json(&runner.metrics()));

        let ingest_route = warp::path("ingest")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .map(
                |input: DeliveryInput, state: SharedModel, runner: Arc<Runner>| {
                    let outcome = runner.execute(&input).and_then(|analysis| {
                        let body = json!({
                            "status": "ok",
                            "is_hit": analysis.impact.is_hit,
                            "zone": analysis.impact.zone,
                        });
                        store(
                            &state,
                            VisualizationModel {
                                analysis: Some(analysis),
                                metrics: runner.metrics(),
                                status: format!("ingested {} delivery", input.kind()),
                            },
                        )?;
                        Ok(body)
                    });
                    match outcome {
                        Ok(body) => {
                            warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
                        }
                        Err(err) => {
                            warn!("ingest error: {:#}", err);
                            warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "error",
                                    "message": format!("{:#}", err),
                                })),
                                StatusCode::UNPROCESSABLE_ENTITY,
                            )
                        }
                    }
                },
            );

        analysis_route.or(metrics_route).or(ingest_route)
    }

    /// Serves the routes on a dedicated thread with its own runtime.
    pub fn serve(&self, address: SocketAddr) -> Result<thread::JoinHandle<()>> {
        let routes = self.routes();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building bridge runtime")?;
        info!("bridge listening on http://{}", address);
        Ok(thread::spawn(move || {
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        }))
    }

    pub fn publish(&self, model: VisualizationModel) -> Result<()> {
        info!(
            "[GUI] status: {}, verdict: {}",
            model.status,
            model
                .analysis
                .as_ref()
                .map(|a| a.impact.zone.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        store(&self.state, model)
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
        if let Ok(mut guard) = self.state.write() {
            guard.status = message.to_string();
        }
    }

    pub fn snapshot(&self) -> VisualizationModel {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
