use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use editor_client::layout::EditorLayout;
use editor_client::settings::EditorSettings;
use editor_client::EditorClientPlugin;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let settings = EditorSettings::load();

    // RUST_LOG 优先于设置中的日志级别
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_filter()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let window_size = EditorLayout::default().window_size();
    tracing::info!("棋盘编辑器启动，窗口 {}x{}", window_size.x, window_size.y);

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Chess Board Editor".into(),
                        resolution: WindowResolution::new(
                            window_size.x as u32,
                            window_size.y as u32,
                        ),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .add_plugins(EditorClientPlugin)
        .run();
}
