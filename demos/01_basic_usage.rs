//! Example 01: Basic Usage
//!
//! This example walks through the task list operations using an in-memory
//! store: adding, completing, editing, filtering and clearing tasks.
//!
//! Run with: cargo run --example 01_basic_usage

use tasklist::{FilterMode, MemoryStorage, TaskStore};

fn print_view(store: &TaskStore<MemoryStorage>, mode: FilterMode, query: &str) {
    println!("  view({}, {:?}):", mode, query);
    for task in store.view(mode, query) {
        let mark = if task.done { "x" } else { " " };
        println!("    [{}] {}", mark, task.title);
    }
    println!("  {} item(s) left\n", store.count_active());
}

fn main() {
    println!("TaskList Basic Usage Example");
    println!("============================\n");

    let mut store = TaskStore::in_memory();

    // Add tasks; blank titles are ignored
    println!("1. Adding tasks...");
    let milk = store.add("Buy Milk").map(|t| t.id.clone());
    let dog = store.add("  walk the dog  ").map(|t| t.id.clone());
    store.add("   ");
    store.add("read a book");
    println!("   Added {} tasks\n", store.len());
    print_view(&store, FilterMode::All, "");

    // Toggle completion
    println!("2. Completing a task...");
    if let Some(id) = &milk {
        store.toggle_done(id);
    }
    print_view(&store, FilterMode::Active, "");
    print_view(&store, FilterMode::Done, "");

    // Search is case-insensitive and combines with the filter
    println!("3. Searching for \"MILK\"...");
    print_view(&store, FilterMode::All, "MILK");

    // Edit a title, then save an empty edit (which deletes the task)
    println!("4. Editing tasks...");
    if let Some(id) = &dog {
        store.begin_edit(id);
        store.update_draft("walk the dog twice");
        store.commit_draft();
    }
    print_view(&store, FilterMode::All, "");

    if let Some(id) = &dog {
        store.begin_edit(id);
        store.commit_edit(id, "");
    }
    println!("   Empty edit removed the task, {} left", store.len());
    print_view(&store, FilterMode::All, "");

    // Bulk operations
    println!("5. Check all, then clear completed...");
    store.set_all_done(true);
    println!("   Active after check all: {}", store.count_active());
    let removed = store.clear_completed();
    println!("   Cleared {} task(s), {} remain", removed, store.len());

    println!("\nExample completed successfully!");
}
