//! Small demonstration: a particle partition with positions, velocities and
//! species tags, grown, mutated, and handed a late-registered column

use propvec::{GrowthPolicy, PropertyStore, Result};

fn main() -> Result<()> {
    println!("Building a particle partition...");

    let mut store = PropertyStore::with_policy(
        GrowthPolicy::new().with_granularity(64).with_shrink_threshold(256),
    );
    let species = store.add_scalar::<u32>();
    let position = store.add_array::<f64>(3);
    let velocity = store.add_array::<f64>(3);

    store.resize(1000);
    println!(
        "{} particles, {} columns, capacity {}",
        store.len(),
        store.num_properties(),
        store.capacity()
    );

    // initialize a simple lattice with alternating species
    {
        let view = store.access_mut();
        let mut tags = view.scalars_mut::<u32>(species)?;
        let mut positions = view.arrays_mut::<f64>(position)?;
        let mut velocities = view.arrays_mut::<f64>(velocity)?;
        for row in view.rows_mut() {
            let i = row.position();
            tags[row] = (i % 2) as u32;
            positions[row][0] = (i % 10) as f64;
            positions[row][1] = ((i / 10) % 10) as f64;
            positions[row][2] = (i / 100) as f64;
            velocities[row][0] = 0.1;
        }
    }

    // a force column registered mid-run starts out zeroed for every particle
    let force = store.add_array::<f64>(3);
    {
        let view = store.access_mut();
        let positions = view.arrays::<f64>(position)?;
        let mut forces = view.arrays_mut::<f64>(force)?;
        for row in view.rows_mut() {
            // toy spring toward the origin
            for axis in 0..3 {
                forces[row][axis] = -0.01 * positions[row][axis];
            }
        }
    }

    // particles leaving the partition are erased; arrivals are row copies
    store.erase_range(0..100);
    store.insert_copy(0, store.len() - 1);
    println!(
        "after exchange: {} particles, capacity {}",
        store.len(),
        store.capacity()
    );

    let tags = store.scalars::<u32>(species)?;
    let first = store.at(0)?;
    println!("first particle is species {}", tags[first]);

    Ok(())
}
