use proptest::prelude::*;
use sdlog::fs::memfs::MemFs;
use sdlog::{LineEnding, LogSink, SinkConfig};

proptest! {
    #[test]
    fn any_line_is_echoed_verbatim(line in any::<String>()) {
        let card = MemFs::new();
        let mut sink = LogSink::new(String::new());
        prop_assert!(sink.initialize(&card));
        sink.emit(&line);

        let expected = format!("{}\n", line);
        prop_assert_eq!(sink.console(), &expected);
        prop_assert_eq!(card.read_file("/log.txt").unwrap(), expected.into_bytes());
    }

    #[test]
    fn lines_land_in_call_order(
        lines in prop::collection::vec(any::<String>(), 0..16),
        crlf in any::<bool>(),
    ) {
        let ending = if crlf { LineEnding::CrLf } else { LineEnding::Lf };
        let card = MemFs::new();
        let mut sink = LogSink::with_config(
            String::new(),
            SinkConfig::default().with_line_ending(ending),
        );
        prop_assert!(sink.initialize(&card));
        for line in &lines {
            sink.emit(line);
        }

        let expected: String = lines
            .iter()
            .map(|line| format!("{}{}", line, ending.as_str()))
            .collect();
        prop_assert_eq!(sink.console(), &expected);
        prop_assert_eq!(card.read_file("/log.txt").unwrap(), expected.into_bytes());
    }

    #[test]
    fn console_only_sink_never_touches_the_card(line in any::<String>()) {
        let card = MemFs::new();
        card.set_read_only(true);
        let mut sink = LogSink::new(String::new());
        prop_assert!(!sink.initialize(&card));
        sink.console_mut().clear();
        sink.emit(&line);

        prop_assert_eq!(sink.console(), &format!("{}\n", line));
        prop_assert!(!card.exists("/log.txt"));
    }
}
