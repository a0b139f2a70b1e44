#[macro_export]
macro_rules! tagged_event {
    ($level:ident, $event_tag:path, $($arg:tt)*) => {{
        fn assert_eventtag(_: &$crate::EventTag) {}
        assert_eventtag(&$event_tag);
        let event_tag_id: u64 = $event_tag.into();
        $crate::tracing::event!($crate::tracing::Level::$level, event_tag_id, $($arg)*)
    }}
}

#[macro_export]
macro_rules! bootstrap_debug {
    ($($arg:tt)*) => { $crate::tagged_event!(DEBUG, $crate::EventTag::BootstrapDebug, $($arg)*) }
}

#[macro_export]
macro_rules! bootstrap_info {
    ($($arg:tt)*) => { $crate::tagged_event!(INFO, $crate::EventTag::BootstrapInfo, $($arg)*) }
}

#[macro_export]
macro_rules! bootstrap_warn {
    ($($arg:tt)*) => { $crate::tagged_event!(WARN, $crate::EventTag::BootstrapWarn, $($arg)*) }
}

#[macro_export]
macro_rules! bootstrap_error {
    ($($arg:tt)*) => { $crate::tagged_event!(ERROR, $crate::EventTag::BootstrapError, $($arg)*) }
}

#[macro_export]
macro_rules! security_info {
    ($($arg:tt)*) => { $crate::tagged_event!(INFO, $crate::EventTag::SecurityInfo, $($arg)*) }
}
