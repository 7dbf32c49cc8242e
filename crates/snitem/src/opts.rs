use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "snitem", version, about = "Watch a StatusNotifierItem and print what it does")]
pub struct Opt {
    /// Write out debug logs.
    #[arg(long = "debug", global = true)]
    pub log_debug: bool,

    /// Bus name of the item (e.g. `:1.50`), or a watcher-style address like
    /// `:1.50/org/ayatana/NotificationItem/nm_applet`.
    pub service: String,

    /// Object path of the item. Ignored when SERVICE already carries a path.
    #[arg(default_value = notifier_item::ItemConfig::DEFAULT_PATH)]
    pub path: String,
}
