use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docwire::{DatabaseId, DocumentKey, ObjectMap, Serializer, Timestamp, Value};

fn document(fields: usize) -> Value {
    let mut map = ObjectMap::new();
    for i in 0..fields {
        let inner = Value::from_iter([
            ("flag", Value::from(i % 2 == 0)),
            ("count", Value::from(i as i64 * -7)),
            ("when", Value::from(Timestamp::new(1_600_000_000 + i as i64, 250).unwrap())),
            ("note", Value::from("some moderately long text for the field")),
        ]);
        map.insert(format!("field{}", i), inner);
    }
    Value::Map(map)
}

fn values(c: &mut Criterion) {
    let serializer = Serializer::new(DatabaseId::new("bench", "(default)"));
    let mut group = c.benchmark_group("value");
    for fields in [1usize, 16, 256] {
        let value = document(fields);
        let bytes = serializer.encode_value(&value).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", fields), &value, |b, value| {
            let mut buf = Vec::with_capacity(bytes.len());
            b.iter(|| {
                buf.clear();
                serializer.encode_value_into(black_box(value), &mut buf).unwrap();
            })
        });
        group.bench_with_input(BenchmarkId::new("decode", fields), &bytes, |b, bytes| {
            b.iter(|| serializer.decode_value(black_box(bytes)).unwrap())
        });
    }
    group.finish();
}

fn keys(c: &mut Criterion) {
    let serializer = Serializer::new(DatabaseId::new("bench", "(default)"));
    let key = DocumentKey::from_path_string("rooms/lobby/messages/0001").unwrap();
    let name = serializer.encode_key(&key);
    c.bench_function("key/encode", |b| b.iter(|| serializer.encode_key(black_box(&key))));
    c.bench_function("key/decode", |b| {
        b.iter(|| serializer.decode_key(black_box(&name)).unwrap())
    });
}

criterion_group!(benches, values, keys);
criterion_main!(benches);
