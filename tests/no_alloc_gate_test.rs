use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_2048::core::{extract_line, resolve_line, Grid, Session};
use tui_2048::term::{FrameBuffer, GameView, Viewport};
use tui_2048::types::Direction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

// Only one test in this binary, so no other thread allocates while counting.
fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let board =
        Grid::from_rows([[2, 2, 4, 4], [0, 8, 0, 8], [16, 0, 0, 16], [2, 4, 8, 16]]).unwrap();
    let mut session = Session::new(1);
    session.start();
    let snap = session.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(80, 24);
    view.render_into(&snap, vp, &mut fb);

    let allocs = with_alloc_counting(|| {
        let mut checksum = 0u64;
        for _ in 0..200 {
            for dir in Direction::ALL {
                for line in 0..4 {
                    let res = resolve_line(extract_line(&board, dir, line));
                    checksum += res.merge_score;
                }
            }
            checksum += board.is_terminal() as u64;
            checksum += board.has_adjacent_pair() as u64;
        }
        assert!(checksum > 0);

        for _ in 0..20 {
            view.render_into(&snap, vp, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
