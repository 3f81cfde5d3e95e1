#[cfg(test)]
mod tests {
    use crate::aws::Request;
    use crate::cli::Cli;
    use crate::regions::{self, AWS_REGIONS, DEFAULT_REGION};
    use crate::types::{LogLine, LogsOutcome};
    use crate::ui::app::{App, Focus, Mode};
    use crate::ui::events::AppEvent;
    use crate::utils::resource_name;
    use chrono::DateTime;
    use clap::Parser;

    fn test_app() -> App {
        let config = aws_config::SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(DEFAULT_REGION))
            .build();
        App::new(config, &AWS_REGIONS[0])
    }

    fn clusters_seq(request: &Request) -> u64 {
        match request {
            Request::LoadClusters { seq, .. } => *seq,
            _ => panic!("expected LoadClusters"),
        }
    }

    fn services_seq(request: &Request) -> u64 {
        match request {
            Request::LoadServices { seq, .. } => *seq,
            _ => panic!("expected LoadServices"),
        }
    }

    fn logs_seq(request: &Request) -> u64 {
        match request {
            Request::LoadLogs { seq, .. } => *seq,
            _ => panic!("expected LoadLogs"),
        }
    }

    fn record(ts: i64, message: &str) -> LogLine {
        LogLine {
            timestamp: DateTime::from_timestamp_millis(ts),
            message: message.to_string(),
        }
    }

    /// App with a cluster list already applied.
    fn app_with_clusters(clusters: &[&str]) -> App {
        let mut app = test_app();
        let request = app.reload_clusters();
        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&request),
            result: Ok(clusters.iter().map(|c| c.to_string()).collect()),
        });
        app
    }

    /// App with cluster 0 committed and its service list applied.
    fn app_with_services(clusters: &[&str], services: &[&str]) -> App {
        let mut app = app_with_clusters(clusters);
        let request = app.select_cluster(0).expect("cluster 0 exists");
        app.apply(AppEvent::ServicesLoaded {
            seq: services_seq(&request),
            result: Ok(services.iter().map(|s| s.to_string()).collect()),
        });
        app
    }

    // Identifier derivation

    #[test]
    fn test_resource_name_from_cluster_arn() {
        let arn = "arn:aws:ecs:us-east-1:123456789012:cluster/my-cluster";
        assert_eq!(resource_name(arn), "my-cluster");
    }

    #[test]
    fn test_resource_name_from_service_arn() {
        let arn = "arn:aws:ecs:us-east-1:123456789012:service/my-cluster/web";
        assert_eq!(resource_name(arn), "web");
    }

    #[test]
    fn test_resource_name_without_slashes() {
        assert_eq!(resource_name("my-cluster"), "my-cluster");
    }

    #[test]
    fn test_resource_name_takes_final_segment_only() {
        assert_eq!(resource_name("prefix/middle/id"), "id");
    }

    // CLI surface

    #[test]
    fn test_cli_default_region() {
        let cli = Cli::try_parse_from(["ecs-console"]).unwrap();
        assert_eq!(cli.region, DEFAULT_REGION);
        assert!(cli.profile.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_region_override() {
        let cli = Cli::try_parse_from(["ecs-console", "--region", "eu-west-1"]).unwrap();
        assert_eq!(cli.region, "eu-west-1");
    }

    #[test]
    fn test_cli_profile_and_verbose() {
        let cli = Cli::try_parse_from(["ecs-console", "-p", "staging", "-v"]).unwrap();
        assert_eq!(cli.profile, Some("staging".to_string()));
        assert!(cli.verbose);
    }

    // Region catalog

    #[test]
    fn test_region_catalog_lookup() {
        assert_eq!(regions::region_index(DEFAULT_REGION), Some(0));
        assert!(regions::region_index("eu-west-2").is_some());
        assert_eq!(regions::region_index("moon-base-1"), None);
    }

    #[test]
    fn test_region_catalog_codes_are_unique() {
        for (i, region) in AWS_REGIONS.iter().enumerate() {
            assert_eq!(regions::region_index(region.code), Some(i));
        }
    }

    // Selection cascade

    #[test]
    fn test_selecting_cluster_clears_service_and_logs() {
        let mut app = app_with_services(&["api-cluster", "batch-cluster"], &["web"]);
        let request = app.select_service(0).expect("service 0 exists");
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::Lines(vec![record(1_000, "hello")]),
        });
        assert_eq!(app.selected_service.as_deref(), Some("web"));
        assert_eq!(app.log_lines.len(), 1);

        app.select_cluster(1).expect("cluster 1 exists");

        assert_eq!(app.selected_cluster.as_deref(), Some("batch-cluster"));
        assert!(app.selected_service.is_none());
        assert!(app.services.is_empty());
        assert!(app.log_lines.is_empty());
        assert!(app.services_loading);
    }

    #[test]
    fn test_region_switch_clears_everything_below() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        app.select_service(0).unwrap();

        app.switch_region(3).expect("catalog has at least 4 regions");

        assert_eq!(app.ctx.region().code, AWS_REGIONS[3].code);
        assert!(app.clusters.is_empty());
        assert!(app.selected_cluster.is_none());
        assert!(app.services.is_empty());
        assert!(app.selected_service.is_none());
        assert!(app.log_lines.is_empty());
        assert_eq!(app.focus, Focus::Clusters);
        assert!(app.clusters_loading);
    }

    #[test]
    fn test_late_cluster_list_from_previous_region_is_dropped() {
        let mut app = test_app();
        app.reload_clusters();
        let r1 = app.switch_region(1).unwrap();
        let r2 = app.switch_region(2).unwrap();

        // R1's listing arrives after R2 was selected
        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&r1),
            result: Ok(vec!["from-r1".to_string()]),
        });
        assert!(app.clusters.is_empty());
        assert!(app.clusters_loading);

        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&r2),
            result: Ok(vec!["from-r2".to_string()]),
        });
        assert_eq!(app.clusters, vec!["from-r2".to_string()]);
        assert_eq!(app.ctx.region().code, AWS_REGIONS[2].code);
        assert!(!app.clusters_loading);
    }

    #[test]
    fn test_later_service_selection_wins() {
        let mut app = app_with_services(&["api-cluster"], &["web", "worker"]);
        let first = app.select_service(0).unwrap();
        let second = app.select_service(1).unwrap();

        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&first),
            outcome: LogsOutcome::Lines(vec![record(1_000, "stale web line")]),
        });
        assert!(app.log_lines.is_empty());
        assert!(app.logs_loading);

        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&second),
            outcome: LogsOutcome::Lines(vec![record(2_000, "worker line")]),
        });
        assert_eq!(app.log_lines[0].message, "worker line");
        assert_eq!(app.selected_service.as_deref(), Some("worker"));
    }

    #[test]
    fn test_select_cluster_out_of_range_is_a_noop() {
        let mut app = app_with_clusters(&["api-cluster"]);
        assert!(app.select_cluster(5).is_none());
        assert!(app.selected_cluster.is_none());
    }

    #[test]
    fn test_select_service_requires_selected_cluster() {
        let mut app = app_with_clusters(&["api-cluster"]);
        assert!(app.select_service(0).is_none());
    }

    #[test]
    fn test_empty_cluster_list_is_valid() {
        let mut app = test_app();
        let request = app.reload_clusters();
        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&request),
            result: Ok(Vec::new()),
        });
        assert!(app.clusters.is_empty());
        assert!(app.status.is_none());
        assert!(!app.clusters_loading);
    }

    #[test]
    fn test_listing_error_leaves_list_empty_and_surfaces_message() {
        let mut app = test_app();
        let request = app.reload_clusters();
        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&request),
            result: Err("access denied".to_string()),
        });
        assert!(app.clusters.is_empty());
        let status = app.status.as_deref().unwrap();
        assert!(status.contains("failed to list clusters"));
        assert!(status.contains("access denied"));
    }

    // Log pipeline outcomes

    #[test]
    fn test_missing_log_group_renders_notice() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        let request = app.select_service(0).unwrap();
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::NoLogGroup,
        });
        assert_eq!(
            app.log_lines[0].message,
            "Could not find log group for this service."
        );
    }

    #[test]
    fn test_no_streams_renders_notice() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        let request = app.select_service(0).unwrap();
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::NoStreams,
        });
        assert_eq!(
            app.log_lines[0].message,
            "No log streams found for this service."
        );
    }

    #[test]
    fn test_fetch_error_renders_in_log_view() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        let request = app.select_service(0).unwrap();
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::Failed("throttled".to_string()),
        });
        assert_eq!(app.log_lines[0].message, "Error fetching logs: throttled");
    }

    // End-to-end selection scenario (synthetic completions)

    #[test]
    fn test_full_selection_scenario() {
        let mut app = test_app();
        assert_eq!(app.ctx.region().code, "us-east-1");

        let request = app.reload_clusters();
        app.apply(AppEvent::ClustersLoaded {
            seq: clusters_seq(&request),
            result: Ok(vec![resource_name("prod/api-cluster").to_string()]),
        });
        assert_eq!(app.clusters, vec!["api-cluster".to_string()]);

        let request = app.select_cluster(0).unwrap();
        match &request {
            Request::LoadServices { cluster, .. } => assert_eq!(cluster, "api-cluster"),
            _ => panic!("expected LoadServices"),
        }
        app.apply(AppEvent::ServicesLoaded {
            seq: services_seq(&request),
            result: Ok(vec![resource_name("prod/api-cluster/web").to_string()]),
        });
        assert_eq!(app.services, vec!["web".to_string()]);
        assert_eq!(app.focus, Focus::Services);

        let request = app.select_service(0).unwrap();
        match &request {
            Request::LoadLogs { cluster, service, .. } => {
                assert_eq!(cluster, "api-cluster");
                assert_eq!(service, "web");
            }
            _ => panic!("expected LoadLogs"),
        }
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::Lines(vec![
                record(1_000, "listening on :8080"),
                record(2_000, "GET /health 200"),
                record(3_000, "GET / 200"),
            ]),
        });

        let messages: Vec<&str> = app.log_lines.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["listening on :8080", "GET /health 200", "GET / 200"]
        );
    }

    // Redeploy

    #[test]
    fn test_redeploy_requires_full_selection() {
        let mut app = test_app();
        assert!(app.redeploy_selected().is_none());

        let mut app = app_with_services(&["api-cluster"], &["web"]);
        // Cluster committed but no service yet
        assert!(app.redeploy_selected().is_none());
    }

    #[test]
    fn test_redeploy_targets_selection_with_current_context() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        app.select_service(0).unwrap();

        let request = app.redeploy_selected().expect("full selection present");
        match request {
            Request::Redeploy { ctx, cluster, service } => {
                assert_eq!(cluster, "api-cluster");
                assert_eq!(service, "web");
                // The request keeps the region bound at invocation time even
                // if the app rebinds afterwards.
                app.switch_region(2).unwrap();
                assert_eq!(ctx.region().code, AWS_REGIONS[0].code);
            }
            _ => panic!("expected Redeploy"),
        }
    }

    #[test]
    fn test_redeploy_failure_is_surfaced_not_retried() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        app.select_service(0).unwrap();
        app.redeploy_selected().unwrap();

        app.apply(AppEvent::RedeployDone {
            service: "web".to_string(),
            result: Err("service is updating".to_string()),
        });
        let status = app.status.as_deref().unwrap();
        assert!(status.contains("redeploy of web failed"));
        assert!(status.contains("service is updating"));
    }

    #[test]
    fn test_redeploy_success_is_acknowledged() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        app.select_service(0).unwrap();
        app.redeploy_selected().unwrap();

        app.apply(AppEvent::RedeployDone {
            service: "web".to_string(),
            result: Ok(()),
        });
        assert_eq!(
            app.status.as_deref(),
            Some("forced new deployment of web")
        );
    }

    // Navigation

    #[test]
    fn test_highlight_navigation_wraps() {
        let mut app = app_with_clusters(&["a", "b", "c"]);
        assert_eq!(app.cluster_state.selected(), Some(0));
        app.move_up();
        assert_eq!(app.cluster_state.selected(), Some(2));
        app.move_down();
        assert_eq!(app.cluster_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_list_is_safe() {
        let mut app = test_app();
        app.move_down();
        app.move_up();
        assert_eq!(app.cluster_state.selected(), None);
    }

    #[test]
    fn test_activate_highlighted_commits_cluster() {
        let mut app = app_with_clusters(&["api-cluster", "batch-cluster"]);
        app.move_down();
        let request = app.activate_highlighted().unwrap();
        match request {
            Request::LoadServices { cluster, .. } => assert_eq!(cluster, "batch-cluster"),
            _ => panic!("expected LoadServices"),
        }
        assert_eq!(app.selected_cluster.as_deref(), Some("batch-cluster"));
    }

    #[test]
    fn test_region_picker_rebinds_and_reloads() {
        let mut app = test_app();
        app.open_region_picker();
        assert_eq!(app.mode, Mode::RegionPicker);
        assert_eq!(app.region_state.selected(), Some(0));

        app.region_picker_next();
        let request = app.confirm_region_pick().expect("picker had a highlight");
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.ctx.region().code, AWS_REGIONS[1].code);
        match request {
            Request::LoadClusters { ctx, .. } => {
                assert_eq!(ctx.region().code, AWS_REGIONS[1].code);
            }
            _ => panic!("expected LoadClusters"),
        }
    }

    #[test]
    fn test_log_scroll_stays_in_bounds() {
        let mut app = app_with_services(&["api-cluster"], &["web"]);
        let request = app.select_service(0).unwrap();
        app.apply(AppEvent::LogsLoaded {
            seq: logs_seq(&request),
            outcome: LogsOutcome::Lines((0..5i64).map(|i| record(i * 1_000, "line")).collect()),
        });

        app.logs_page_down(20);
        assert_eq!(app.log_scroll, 4);
        app.logs_page_down(1);
        assert_eq!(app.log_scroll, 4);
        app.logs_page_up(20);
        assert_eq!(app.log_scroll, 0);
        app.logs_page_up(1);
        assert_eq!(app.log_scroll, 0);
    }
}
