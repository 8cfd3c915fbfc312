//! Terminal logging: `say!` for info, `yay!` for success, `hey!` for
//! warnings and `nay!` for errors. Every line is stamped with local time.

#[doc(hidden)]
pub fn stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[macro_export]
macro_rules! say {
    ($($arg:tt)*) => {{
        println!(
            "{}[{}] {}* {}",
            better_term::Color::BrightBlack,
            $crate::logging::stamp(),
            better_term::Color::White,
            format!($($arg)*)
        );
        better_term::flush_styles();
    }};
}

#[macro_export]
macro_rules! yay {
    ($($arg:tt)*) => {{
        println!(
            "{}[{}] {}+ {}",
            better_term::Color::BrightBlack,
            $crate::logging::stamp(),
            better_term::Color::Green,
            format!($($arg)*)
        );
        better_term::flush_styles();
    }};
}

#[macro_export]
macro_rules! hey {
    ($($arg:tt)*) => {{
        println!(
            "{}[{}] {}! {}",
            better_term::Color::BrightBlack,
            $crate::logging::stamp(),
            better_term::Color::Yellow,
            format!($($arg)*)
        );
        better_term::flush_styles();
    }};
}

#[macro_export]
macro_rules! nay {
    ($($arg:tt)*) => {{
        eprintln!(
            "{}[{}] {}x {}",
            better_term::Color::BrightBlack,
            $crate::logging::stamp(),
            better_term::Color::Red,
            format!($($arg)*)
        );
        better_term::flush_styles();
    }};
}
