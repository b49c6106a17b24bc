/// Unit tests for the public streak engine API
mod streak_properties;
