use anyhow::{Result, bail};
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::types::OrderBy;
use aws_sdk_ecs::types::{ContainerDefinition, LogDriver};
use chrono::DateTime;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::regions::RegionInfo;
use crate::types::{LogLine, LogsOutcome};
use crate::ui::AppEvent;
use crate::utils::resource_name;

/// Region-scoped pair of service clients.
///
/// The two handles are only ever replaced together by [`RegionContext::bind`];
/// in-flight requests hold a clone of the whole context, so a region switch
/// can never swap one client out from under a running call.
#[derive(Clone)]
pub struct RegionContext {
    region: &'static RegionInfo,
    ecs: aws_sdk_ecs::Client,
    logs: aws_sdk_cloudwatchlogs::Client,
}

impl RegionContext {
    /// Build both clients against `region` from the shared base config.
    /// Purely local configuration; credential problems surface on first use.
    pub fn bind(shared: &SdkConfig, region: &'static RegionInfo) -> Self {
        let ecs_config = aws_sdk_ecs::config::Builder::from(shared)
            .region(aws_config::Region::new(region.code))
            .build();
        let logs_config = aws_sdk_cloudwatchlogs::config::Builder::from(shared)
            .region(aws_config::Region::new(region.code))
            .build();
        Self {
            region,
            ecs: aws_sdk_ecs::Client::from_conf(ecs_config),
            logs: aws_sdk_cloudwatchlogs::Client::from_conf(logs_config),
        }
    }

    pub fn region(&self) -> &'static RegionInfo {
        self.region
    }

    /// List cluster names in the bound region, ARNs reduced to their final
    /// path segment.
    pub async fn list_clusters(&self) -> Result<Vec<String>> {
        let resp = self.ecs.list_clusters().send().await?;
        Ok(resp
            .cluster_arns()
            .iter()
            .map(|arn| resource_name(arn).to_string())
            .collect())
    }

    /// List service names in `cluster`, same derivation rule as clusters.
    pub async fn list_services(&self, cluster: &str) -> Result<Vec<String>> {
        let resp = self.ecs.list_services().cluster(cluster).send().await?;
        Ok(resp
            .service_arns()
            .iter()
            .map(|arn| resource_name(arn).to_string())
            .collect())
    }

    /// Determine which log group holds the service's output by walking its
    /// task definition. `None` means the service has no awslogs-backed
    /// container, which is a valid configuration, not an error.
    pub async fn resolve_log_group(&self, cluster: &str, service: &str) -> Result<Option<String>> {
        let resp = self
            .ecs
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await?;
        let Some(svc) = resp.services().first() else {
            bail!("service {service} not found in cluster {cluster}");
        };
        let Some(task_definition_arn) = svc.task_definition() else {
            return Ok(None);
        };

        let resp = self
            .ecs
            .describe_task_definition()
            .task_definition(task_definition_arn)
            .send()
            .await?;
        let Some(task_definition) = resp.task_definition() else {
            return Ok(None);
        };

        Ok(log_group_from_containers(task_definition.container_definitions()).map(String::from))
    }

    /// Fetch up to 100 of the most recent records from the most recently
    /// active stream of `group`, oldest first. `None` means the group has no
    /// streams yet.
    pub async fn fetch_latest_logs(&self, group: &str) -> Result<Option<Vec<LogLine>>> {
        let resp = self
            .logs
            .describe_log_streams()
            .log_group_name(group)
            .order_by(OrderBy::LastEventTime)
            .descending(true)
            .limit(1)
            .send()
            .await?;
        let Some(stream) = resp.log_streams().first().and_then(|s| s.log_stream_name()) else {
            return Ok(None);
        };

        let resp = self
            .logs
            .get_log_events()
            .log_group_name(group)
            .log_stream_name(stream)
            .limit(100)
            .start_from_head(false)
            .send()
            .await?;
        let mut lines: Vec<LogLine> = resp
            .events()
            .iter()
            .map(|event| LogLine {
                timestamp: event.timestamp().and_then(DateTime::from_timestamp_millis),
                message: event.message().unwrap_or_default().to_string(),
            })
            .collect();
        lines.sort_by_key(|line| line.timestamp);
        Ok(Some(lines))
    }

    /// Force a new deployment of the service. Fire-and-forget: the rollout is
    /// not awaited or polled.
    pub async fn force_redeploy(&self, cluster: &str, service: &str) -> Result<()> {
        self.ecs
            .update_service()
            .cluster(cluster)
            .service(service)
            .force_new_deployment(true)
            .send()
            .await?;
        Ok(())
    }
}

/// Scan container definitions in their defined order and return the log group
/// of the first one using the awslogs driver with a group option. Containers
/// may disagree on logging configuration; later matches are ignored.
pub fn log_group_from_containers(definitions: &[ContainerDefinition]) -> Option<&str> {
    definitions.iter().find_map(|definition| {
        let config = definition.log_configuration()?;
        if config.log_driver() != &LogDriver::Awslogs {
            return None;
        }
        config.options()?.get("awslogs-group").map(String::as_str)
    })
}

/// A unit of background work dispatched from the UI loop.
///
/// Each request carries the client pair captured when it was issued, so a
/// later region switch cannot redirect it, and a sequence number the state
/// machine uses to drop results that arrive after the selection moved on.
#[derive(Clone)]
pub enum Request {
    LoadClusters {
        seq: u64,
        ctx: RegionContext,
    },
    LoadServices {
        seq: u64,
        ctx: RegionContext,
        cluster: String,
    },
    LoadLogs {
        seq: u64,
        ctx: RegionContext,
        cluster: String,
        service: String,
    },
    Redeploy {
        ctx: RegionContext,
        cluster: String,
        service: String,
    },
}

/// Execute one request and report the result back to the UI loop. Never
/// returns an error: every failure is folded into the completion event.
pub async fn perform(request: Request, tx: mpsc::Sender<AppEvent>) {
    match request {
        Request::LoadClusters { seq, ctx } => {
            debug!("[{}] listing clusters", ctx.region().code);
            let result = ctx.list_clusters().await.map_err(|e| format!("{e:#}"));
            let _ = tx.send(AppEvent::ClustersLoaded { seq, result }).await;
        }
        Request::LoadServices { seq, ctx, cluster } => {
            debug!("[{}] listing services in {}", ctx.region().code, cluster);
            let result = ctx
                .list_services(&cluster)
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(AppEvent::ServicesLoaded { seq, result }).await;
        }
        Request::LoadLogs {
            seq,
            ctx,
            cluster,
            service,
        } => {
            debug!("[{}] loading logs for {}/{}", ctx.region().code, cluster, service);
            let outcome = load_logs(&ctx, &cluster, &service).await;
            let _ = tx.send(AppEvent::LogsLoaded { seq, outcome }).await;
        }
        Request::Redeploy {
            ctx,
            cluster,
            service,
        } => {
            info!(
                "[{}] forcing new deployment of {}/{}",
                ctx.region().code,
                cluster,
                service
            );
            let result = ctx
                .force_redeploy(&cluster, &service)
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(AppEvent::RedeployDone { service, result }).await;
        }
    }
}

/// The resolve-and-fetch pipeline for one service, with every failure mode
/// flattened into an outcome the log view can render.
async fn load_logs(ctx: &RegionContext, cluster: &str, service: &str) -> LogsOutcome {
    let group = match ctx.resolve_log_group(cluster, service).await {
        Ok(Some(group)) => group,
        Ok(None) => return LogsOutcome::NoLogGroup,
        Err(e) => return LogsOutcome::Failed(format!("{e:#}")),
    };
    debug!("resolved log group {group} for {cluster}/{service}");
    match ctx.fetch_latest_logs(&group).await {
        Ok(Some(lines)) => LogsOutcome::Lines(lines),
        Ok(None) => LogsOutcome::NoStreams,
        Err(e) => LogsOutcome::Failed(format!("{e:#}")),
    }
}
