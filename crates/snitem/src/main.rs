use anyhow::{Context, Result};
use clap::Parser as _;
use notifier_item::{ItemConfig, ItemEvent, SnItem};

mod opts;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = opts::Opt::parse();

    let log_level_filter = if opt.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("snitem"), log_level_filter)
            .filter(Some("notifier_item"), log_level_filter)
            .init();
    }

    let config = if opt.service.contains('/') {
        ItemConfig::from_address(&opt.service).context("Failed to parse item address")?
    } else {
        ItemConfig::new(&opt.service, &opt.path)
    };

    let (item, mut events) = SnItem::connect(config);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Some(event) => report(&item, event).await,
                None => break,
            },
        }
    }

    item.destroy();
    Ok(())
}

/// Events carry no payload, so each one is answered by re-reading the
/// properties it invalidates.
async fn report(item: &SnItem, event: ItemEvent) {
    match event {
        ItemEvent::Ready => {
            println!("ready: {} at {}", item.bus_name(), item.object_path());
            println!("  id: {:?}  title: {:?}", item.id().await, item.title().await);
            println!("  category: {:?}  status: {:?}", item.category().await, item.status().await);
            println!("  menu: {:?}  item-is-menu: {}", item.menu().await, item.item_is_menu().await);
            println!("  icon: {:?}  theme path: {:?}", item.icon_name().await, item.icon_theme_path().await);
        }
        ItemEvent::UpdateIcon => {
            let pixmaps = item.icon_pixmap().await.map_or(0, |p| p.len());
            println!("update-icon: name {:?}, {} pixmap(s)", item.icon_name().await, pixmaps);
        }
        ItemEvent::UpdateStatus => println!("update-status: {:?}", item.status().await),
        ItemEvent::UpdateTooltip => println!("update-tooltip: {:?}", item.tooltip().await),
        ItemEvent::UpdateMenu => println!("update-menu"),
    }
}
