use raster_paint::{History, PaintError, PixelBuffer, Rgba};

const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);

fn shade(value: u8) -> Rgba {
    image::Rgba([value, 0, 0, 255])
}

// Helper: record history, then paint pixel (0, 0) with `value`
fn commit(history: &mut History, buffer: &mut PixelBuffer, value: u8) {
    history.begin_mutation(buffer);
    buffer.set_pixel(0, 0, shade(value)).unwrap();
}

#[test]
fn test_undo_then_redo_restores_each_step() {
    let mut buffer = PixelBuffer::new(4, 4, WHITE);
    let mut history = History::default();
    for value in 1..=5 {
        commit(&mut history, &mut buffer, value);
    }

    for expected in (1..=4).rev() {
        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(expected));
    }
    history.undo(&mut buffer).unwrap();
    assert_eq!(buffer, PixelBuffer::new(4, 4, WHITE));
    assert!(matches!(history.undo(&mut buffer), Err(PaintError::NothingToUndo)));

    for expected in 1..=5 {
        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(expected));
    }
    assert!(matches!(history.redo(&mut buffer), Err(PaintError::NothingToRedo)));
}

#[test]
fn test_oldest_entries_are_evicted() {
    let mut buffer = PixelBuffer::new(2, 2, WHITE);
    let mut history = History::new(3);
    for value in 1..=5 {
        commit(&mut history, &mut buffer, value);
    }
    assert_eq!(history.undo_len(), 3);

    for _ in 0..3 {
        history.undo(&mut buffer).unwrap();
    }
    // The states before commits 1 and 2 are gone.
    assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(2));
    assert!(!history.can_undo());
    assert!(history.undo(&mut buffer).unwrap_err().is_history_noop());
    assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(2));
}

#[test]
fn test_default_capacity_is_thirty() {
    let mut buffer = PixelBuffer::new(1, 1, WHITE);
    let mut history = History::default();
    for value in 0..40 {
        commit(&mut history, &mut buffer, value);
    }
    assert_eq!(history.capacity(), 30);
    assert_eq!(history.undo_len(), 30);
}

#[test]
fn test_full_default_history_round_trips() {
    let blank = PixelBuffer::new(2, 2, WHITE);
    let mut buffer = blank.clone();
    let mut history = History::default();
    for value in 1..=30 {
        commit(&mut history, &mut buffer, value);
    }
    let last = buffer.clone();

    for expected in (1..=29).rev() {
        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(expected));
    }
    history.undo(&mut buffer).unwrap();
    assert_eq!(buffer, blank);

    // A 31st undo has nothing left and leaves the canvas alone.
    assert!(matches!(history.undo(&mut buffer), Err(PaintError::NothingToUndo)));
    assert_eq!(buffer, blank);

    for _ in 0..30 {
        history.redo(&mut buffer).unwrap();
    }
    assert_eq!(buffer, last);
    assert!(!history.can_redo());
}

#[test]
fn test_new_commit_clears_redo() {
    let mut buffer = PixelBuffer::new(2, 2, WHITE);
    let mut history = History::default();
    commit(&mut history, &mut buffer, 1);
    commit(&mut history, &mut buffer, 2);

    history.undo(&mut buffer).unwrap();
    assert!(history.can_redo());

    commit(&mut history, &mut buffer, 9);
    assert!(!history.can_redo());
    assert!(matches!(history.redo(&mut buffer), Err(PaintError::NothingToRedo)));
    assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(9));

    history.undo(&mut buffer).unwrap();
    assert_eq!(buffer.get_pixel(0, 0).unwrap(), shade(1));
}

#[test]
fn test_snapshot_is_independent_of_later_writes() {
    let mut buffer = PixelBuffer::new(3, 3, WHITE);
    let snapshot = buffer.snapshot();
    buffer.set_pixel(1, 1, shade(7)).unwrap();

    assert!(snapshot.as_raw().iter().all(|&b| b == 255));
    buffer.restore(&snapshot).unwrap();
    assert_eq!(buffer.get_pixel(1, 1).unwrap(), WHITE);

    // Restoring leaves the snapshot usable.
    buffer.set_pixel(0, 0, shade(3)).unwrap();
    buffer.restore(&snapshot).unwrap();
    assert_eq!(buffer, PixelBuffer::new(3, 3, WHITE));
}

#[test]
fn test_clear_forgets_everything() {
    let mut buffer = PixelBuffer::new(2, 2, WHITE);
    let mut history = History::default();
    commit(&mut history, &mut buffer, 1);
    commit(&mut history, &mut buffer, 2);
    history.undo(&mut buffer).unwrap();

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
