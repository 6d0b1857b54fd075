use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wbcache::WriteBackCache;
use wbstore::MemoryStore;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_hit", |b| {
        let store: MemoryStore<u64, Vec<u8>> = MemoryStore::new();
        let mut cache = WriteBackCache::new(1000, store).unwrap();
        let data = vec![b'x'; 1024];

        for id in 0..100u64 {
            cache.put(id, data.clone()).unwrap();
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_evicting", |b| {
        let store: MemoryStore<u64, Vec<u8>> = MemoryStore::new();
        let mut cache = WriteBackCache::new(64, store).unwrap();
        let data = vec![b'x'; 1024];

        let mut counter = 0u64;
        b.iter(|| {
            let key = counter % 256;
            if counter.is_multiple_of(2) {
                black_box(cache.get(&key).unwrap());
            } else {
                cache.put(key, data.clone()).unwrap();
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_cache_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_fill", |b| {
        let store: MemoryStore<u64, Vec<u8>> = MemoryStore::new();
        let data = vec![b'x'; 1024];
        for id in 0..100u64 {
            store.insert(id, data.clone());
        }
        let mut cache = WriteBackCache::new(10, store).unwrap();

        let mut counter = 0u64;
        b.iter(|| {
            // Cycling over 100 keys with room for 10 misses every time
            black_box(cache.get(&(counter % 100)).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    c.bench_function("flush_1000_dirty", |b| {
        let store: MemoryStore<u64, u64> = MemoryStore::new();
        let mut cache = WriteBackCache::new(1000, store).unwrap();

        b.iter(|| {
            for id in 0..1000u64 {
                cache.put(id, id).unwrap();
            }
            black_box(cache.flush().unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_cache_miss,
    bench_flush
);
criterion_main!(benches);
