use crate::regions::AWS_REGIONS;
use crate::ui::app::{App, Focus, Mode};
use crate::ui::layout::create_layout;
use crate::ui::widgets::{HelpOverlay, LogView, RegionPicker, ResourceList, StatusBar};
use ratatui::{Frame, Terminal, backend::Backend};

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    terminal.draw(|f| render_frame(f, app))?;
    Ok(())
}

fn render_frame(f: &mut Frame, app: &mut App) {
    let layout = create_layout(f.area());

    let cluster_list = ResourceList::new(
        "Clusters",
        &app.clusters,
        app.focus == Focus::Clusters && app.mode == Mode::Normal,
        app.clusters_loading,
    );
    f.render_stateful_widget(cluster_list, layout.clusters, &mut app.cluster_state);

    let service_list = ResourceList::new(
        "Services",
        &app.services,
        app.focus == Focus::Services && app.mode == Mode::Normal,
        app.services_loading,
    );
    f.render_stateful_widget(service_list, layout.services, &mut app.service_state);

    let log_view = LogView::new(
        &app.log_lines,
        app.log_scroll,
        app.show_timestamps,
        app.selected_service.as_deref(),
        app.logs_loading,
    );
    f.render_widget(log_view, layout.logs);

    let status_bar = StatusBar::new(
        app.ctx.region(),
        app.selected_cluster.as_deref(),
        app.selected_service.as_deref(),
        app.status.as_deref(),
    );
    f.render_widget(status_bar, layout.status_bar);

    if app.mode == Mode::RegionPicker {
        let picker = RegionPicker::new(AWS_REGIONS);
        f.render_stateful_widget(picker, f.area(), &mut app.region_state);
    }

    if app.mode == Mode::Help {
        f.render_widget(HelpOverlay, f.area());
    }
}
