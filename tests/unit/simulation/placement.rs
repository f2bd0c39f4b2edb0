//! Tests for the forward placement rule and replay verification

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use unbuild::simulation::placement::{apply_command, raise, simulate, verify_commands};
    use unbuild::{Command, HeightMap, SolveError};

    // Tests heights climb by one and wrap from 4 to 1, empty lots stay empty
    // Verified by wrapping at 5 instead of 4
    #[test]
    fn test_raise_wraps() {
        let mut height = 3;
        raise(&mut height);
        assert_eq!(height, 4);
        raise(&mut height);
        assert_eq!(height, 1);

        let mut empty = 0;
        raise(&mut empty);
        assert_eq!(empty, 0);
    }

    // Tests a placement raises only its occupied 4-neighbours
    // Verified by also raising diagonal neighbours
    #[test]
    fn test_apply_command_neighbours() {
        let mut heights = Array2::zeros((3, 3));
        for command in [Command::new(0, 0), Command::new(0, 2), Command::new(2, 2)] {
            apply_command(&mut heights, command).unwrap();
        }
        apply_command(&mut heights, Command::new(1, 2)).unwrap();

        assert_eq!(heights.get([0, 2]), Some(&2));
        assert_eq!(heights.get([2, 2]), Some(&2));
        assert_eq!(heights.get([0, 0]), Some(&1));
        assert_eq!(heights.get([1, 2]), Some(&1));
        assert_eq!(heights.get([1, 1]), Some(&0));
    }

    // Tests occupied and out-of-range targets are refused
    // Verified by overwriting occupied cells
    #[test]
    fn test_apply_command_invalid() {
        let mut heights = Array2::zeros((2, 2));
        apply_command(&mut heights, Command::new(0, 0)).unwrap();
        assert!(matches!(
            apply_command(&mut heights, Command::new(0, 0)),
            Err(SolveError::InvalidCommand { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            apply_command(&mut heights, Command::new(2, 0)),
            Err(SolveError::InvalidCommand { row: 2, col: 0, .. })
        ));
    }

    // Tests a centre surrounded by four later buildings wraps back to 1
    // Verified by clamping heights at 4
    #[test]
    fn test_simulate_plus() {
        let commands = [
            Command::new(1, 1),
            Command::new(0, 1),
            Command::new(1, 0),
            Command::new(1, 2),
            Command::new(2, 1),
        ];
        let map = simulate(3, 3, &commands).unwrap();
        assert_eq!(
            map.to_rows(),
            vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]
        );
    }

    // Tests verification accepts aliases and names the first mismatch
    // Verified by comparing against the raw input instead of the normalized one
    #[test]
    fn test_verify_commands() {
        let commands = [Command::new(0, 1), Command::new(0, 0)];
        let map = HeightMap::from_rows(&[vec![5, 2]]).unwrap();
        verify_commands(&map, &commands).unwrap();

        let reversed = [Command::new(0, 0), Command::new(0, 1)];
        match verify_commands(&map, &reversed) {
            Err(SolveError::ReplayMismatch {
                row,
                col,
                expected,
                found,
            }) => {
                assert_eq!((row, col, expected, found), (0, 0, 1, 2));
            }
            _ => unreachable!("Expected ReplayMismatch error type"),
        }
    }
}
