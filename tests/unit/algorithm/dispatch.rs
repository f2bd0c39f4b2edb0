//! Tests for the bounded area queue and the sequential and parallel solvers

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use unbuild::SolveError;
    use unbuild::algorithm::commands::extract_commands;
    use unbuild::algorithm::dispatch::{AreaQueue, solve_parallel, solve_sequential};
    use unbuild::algorithm::partition::{Area, Partitioner};
    use unbuild::simulation::placement::verify_commands;
    use unbuild::spatial::{HeightMap, Parcel};

    fn separate_pieces() -> HeightMap {
        HeightMap::from_rows(&[
            vec![1, 2, 0, 2, 1],
            vec![0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 5],
        ])
        .unwrap()
    }

    fn components(parcel: &mut Parcel) -> Vec<Area> {
        let scope = Area::full(parcel.len());
        Partitioner::new()
            .color_check(parcel, &scope, true)
            .unwrap()
    }

    // Tests submitted areas come back out and the length tracks them
    // Verified by dropping areas in submit
    #[test]
    fn test_queue_submit_take() {
        let queue = AreaQueue::new(4);
        assert!(queue.submit(Area::full(2)));
        assert!(queue.submit(Area::full(3)));
        assert_eq!(queue.len(), 2);
        assert!(queue.take().is_some());
        assert!(queue.take().is_some());
        assert!(queue.is_empty());
    }

    // Tests a closed queue refuses work and releases waiting consumers
    // Verified by not notifying waiters on close
    #[test]
    fn test_queue_close() {
        let queue = Arc::new(AreaQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.take())
        };
        queue.close();
        assert!(consumer.join().unwrap().is_none());
        assert!(queue.is_closed());
        assert!(!queue.submit(Area::full(1)));
    }

    // Tests the producer blocks at capacity until a consumer drains the queue
    // Verified by ignoring the capacity bound in submit
    #[test]
    fn test_queue_backpressure() {
        let queue = Arc::new(AreaQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut taken = 0;
                while queue.take().is_some() {
                    taken += 1;
                }
                taken
            })
        };
        for size in 1..=5 {
            assert!(queue.submit(Area::full(size)));
            assert!(queue.len() <= 1);
        }
        queue.drain_and_close();
        assert_eq!(consumer.join().unwrap(), 5);
    }

    // Tests sequential solving covers every component
    // Verified by solving only the first area
    #[test]
    fn test_solve_sequential() {
        let map = separate_pieces();
        let mut parcel = Parcel::new(&map);
        let areas = components(&mut parcel);
        assert_eq!(areas.len(), 4);

        let solved = solve_sequential(&mut parcel, areas).unwrap();
        let commands = extract_commands(&solved.history, &map).unwrap();
        verify_commands(&map, &commands).unwrap();
        assert_eq!(parcel.live_count(), 0);
    }

    // Tests parallel solving merges every thread's removals
    // Verified by keeping only the last merged history
    #[test]
    fn test_solve_parallel() {
        let map = separate_pieces();
        let mut parcel = Parcel::new(&map);
        let areas = components(&mut parcel);

        let solved = solve_parallel(&parcel, areas, 3, 1).unwrap();
        assert_eq!(solved.history.removals().count(), map.occupied());
        let commands = extract_commands(&solved.history, &map).unwrap();
        verify_commands(&map, &commands).unwrap();
    }

    // Tests an empty batch returns an empty solution
    // Verified by spawning zero threads and waiting forever
    #[test]
    fn test_solve_parallel_empty() {
        let map = separate_pieces();
        let parcel = Parcel::new(&map);
        let solved = solve_parallel(&parcel, Vec::new(), 4, 2).unwrap();
        assert!(solved.history.is_empty());
    }

    // Tests a failing area surfaces as a global failure from the pool
    // Verified by discarding thread results on join
    #[test]
    fn test_solve_parallel_failure() {
        let map = HeightMap::from_rows(&[vec![2, 2], vec![2, 2]]).unwrap();
        let parcel = Parcel::new(&map);
        let result = solve_parallel(&parcel, vec![Area::full(parcel.len())], 2, 1);
        assert!(matches!(
            result,
            Err(SolveError::GlobalInconsistency { .. })
        ));
    }
}
