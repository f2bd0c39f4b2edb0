//! Tests for the text map format and command list output

#[cfg(test)]
mod tests {
    use unbuild::io::mapfile::{format_commands, format_map, parse_map, read_map, write_commands};
    use unbuild::{Command, SolveError};

    // Tests a well-formed map parses with blank lines and extra spaces ignored
    // Verified by treating blank lines as empty rows
    #[test]
    fn test_parse_map() {
        let text = "2 3\n\n1 2 0\n  0   4 6 \n";
        let map = parse_map(text).unwrap();
        assert_eq!(map.to_rows(), vec![vec![1, 2, 0], vec![0, 4, 6]]);
    }

    // Tests header problems are reported on the header line
    // Verified by accepting a single header value as a square grid
    #[test]
    fn test_bad_header() {
        assert!(matches!(
            parse_map(""),
            Err(SolveError::MapParse { line: 1, .. })
        ));
        assert!(matches!(
            parse_map("\n3\n1 1 1\n"),
            Err(SolveError::MapParse { line: 2, .. })
        ));
        assert!(matches!(
            parse_map("two 2\n1 1\n1 1\n"),
            Err(SolveError::MapParse { line: 1, .. })
        ));
    }

    // Tests row problems name the offending line
    // Verified by reporting the row index instead of the line number
    #[test]
    fn test_bad_rows() {
        assert!(matches!(
            parse_map("2 2\n1 1\n1\n"),
            Err(SolveError::MapParse { line: 3, .. })
        ));
        assert!(matches!(
            parse_map("1 2\n1 x\n"),
            Err(SolveError::MapParse { line: 2, .. })
        ));
        assert!(matches!(
            parse_map("1 2\n1 1\n1 1\n"),
            Err(SolveError::MapParse { line: 3, .. })
        ));
        assert!(matches!(
            parse_map("3 1\n1\n1\n"),
            Err(SolveError::MapParse { .. })
        ));
    }

    // Tests value range checks still apply after parsing
    // Verified by skipping height validation for parsed maps
    #[test]
    fn test_out_of_range_value() {
        assert!(matches!(
            parse_map("1 2\n1 -3\n"),
            Err(SolveError::InvalidHeight { value: -3, .. })
        ));
    }

    // Tests oversized headers are rejected before any row is read
    // Verified by reserving row storage from the header count
    #[test]
    fn test_oversized_header() {
        match parse_map("18446744073709551615 1\n1\n") {
            Err(SolveError::GridTooLarge { rows, cols: 1, .. }) => assert_eq!(rows, usize::MAX),
            _ => unreachable!("Expected GridTooLarge error type"),
        }
        assert!(matches!(
            parse_map("1000000000000 1\n1\n"),
            Err(SolveError::GridTooLarge { .. })
        ));
        assert!(matches!(
            parse_map("4294967296 4294967296\n1\n"),
            Err(SolveError::GridTooLarge { .. })
        ));
    }

    // Tests formatting produces text the parser reads back
    // Verified by omitting the header line
    #[test]
    fn test_format_map_parses_back() {
        let map = parse_map("2 2\n1 5\n0 3\n").unwrap();
        let text = format_map(&map);
        assert_eq!(text, "2 2\n1 5\n0 3\n");
        assert_eq!(parse_map(&text).unwrap(), map);
    }

    // Tests command lists are written one pair per line
    // Verified by swapping row and column in the output
    #[test]
    fn test_format_commands() {
        let commands = [Command::new(0, 3), Command::new(2, 1)];
        assert_eq!(format_commands(&commands), "0 3\n2 1\n");
        assert_eq!(format_commands(&[]), "");
    }

    // Tests file helpers read maps and write command lists
    // Verified by writing to the wrong path
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let map_path = dir.path().join("small.map");
        std::fs::write(&map_path, "1 2\n1 2\n").unwrap();
        assert_eq!(read_map(&map_path).unwrap().to_rows(), vec![vec![1, 2]]);

        let out_path = dir.path().join("small_order.txt");
        write_commands(&out_path, &[Command::new(0, 1), Command::new(0, 0)]).unwrap();
        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "0 1\n0 0\n");

        assert!(matches!(
            read_map(&dir.path().join("absent.map")),
            Err(SolveError::FileSystem {
                operation: "read",
                ..
            })
        ));
    }
}
